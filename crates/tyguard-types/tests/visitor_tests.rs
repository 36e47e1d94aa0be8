use super::*;

#[test]
fn test_dispatch_intrinsics() {
    let types = TypeInterner::new();

    for id in [
        TypeId::ANY,
        TypeId::UNKNOWN,
        TypeId::NEVER,
        TypeId::NULL,
        TypeId::UNDEFINED,
    ] {
        assert_eq!(dispatch_kind(&types, id), DispatchKind::Special);
    }
    for id in [
        TypeId::NUMBER,
        TypeId::BIGINT,
        TypeId::BOOLEAN,
        TypeId::STRING,
    ] {
        assert_eq!(dispatch_kind(&types, id), DispatchKind::Primitive);
    }
    assert_eq!(dispatch_kind(&types, TypeId::OBJECT), DispatchKind::NonPrimitive);
    assert_eq!(dispatch_kind(&types, TypeId::SYMBOL), DispatchKind::Unsupported);
    assert_eq!(dispatch_kind(&types, TypeId::BUFFER), DispatchKind::Buffer);
}

#[test]
fn test_boolean_literal_before_literal() {
    let mut types = TypeInterner::new();
    let hello = types.literal_string("hello");

    assert_eq!(dispatch_kind(&types, TypeId::TRUE), DispatchKind::BooleanLiteral);
    assert_eq!(dispatch_kind(&types, TypeId::FALSE), DispatchKind::BooleanLiteral);
    assert_eq!(dispatch_kind(&types, hello), DispatchKind::Literal);
}

#[test]
fn test_dispatch_structural_and_operators() {
    let mut types = TypeInterner::new();

    let array = types.array(TypeId::NUMBER);
    let tuple = types.tuple(vec![TupleElement::required(TypeId::NUMBER)]);
    let object = types.object(vec![PropertyInfo::new("a", TypeId::STRING)]);
    let union = types.union(vec![TypeId::STRING, TypeId::NULL]);
    let intersection = types.intersection(vec![object, TypeId::OBJECT]);
    let keyof = types.keyof(object);
    let a = types.literal_string("a");
    let access = types.index_access(object, a);
    let view = types.numeric_view(ViewKind::Int8);
    let (_, param) = types.type_param("T");
    let def = types.declare("Alias", []);
    let reference = types.reference(def, vec![]);

    assert_eq!(dispatch_kind(&types, array), DispatchKind::Array);
    assert_eq!(dispatch_kind(&types, tuple), DispatchKind::Tuple);
    assert_eq!(dispatch_kind(&types, object), DispatchKind::Object);
    assert_eq!(dispatch_kind(&types, union), DispatchKind::Union);
    assert_eq!(dispatch_kind(&types, intersection), DispatchKind::Intersection);
    assert_eq!(dispatch_kind(&types, keyof), DispatchKind::KeyOf);
    assert_eq!(dispatch_kind(&types, access), DispatchKind::IndexAccess);
    assert_eq!(dispatch_kind(&types, view), DispatchKind::NumericView);
    assert_eq!(dispatch_kind(&types, param), DispatchKind::TypeParameter);
    assert_eq!(dispatch_kind(&types, reference), DispatchKind::Reference);
}

#[test]
fn test_unknown_id_is_unsupported() {
    let types = TypeInterner::new();
    assert_eq!(
        dispatch_kind(&types, TypeId(10_000)),
        DispatchKind::Unsupported
    );
}
