use super::*;

#[test]
fn test_interner_builtins() {
    let interner = TypeInterner::new();

    assert_eq!(
        interner.lookup(TypeId::NUMBER),
        Some(&TypeData::Intrinsic(IntrinsicKind::Number))
    );
    assert_eq!(
        interner.lookup(TypeId::TRUE),
        Some(&TypeData::BooleanLiteral(true))
    );
    assert_eq!(interner.lookup(TypeId::BUFFER), Some(&TypeData::Buffer));
    assert_eq!(interner.len() as u32, TypeId::FIRST_USER);
    assert!(TypeId::FALSE.is_builtin());
}

#[test]
fn test_interner_deduplication() {
    let mut interner = TypeInterner::new();

    let id1 = interner.literal_string("hello");
    let id2 = interner.literal_string("hello");
    let id3 = interner.literal_string("world");

    assert_eq!(id1, id2);
    assert_ne!(id1, id3);
    assert!(!id1.is_builtin());

    let obj1 = interner.object(vec![PropertyInfo::new("x", TypeId::NUMBER)]);
    let obj2 = interner.object(vec![PropertyInfo::new("x", TypeId::NUMBER)]);
    let obj3 = interner.object(vec![PropertyInfo::opt("x", TypeId::NUMBER)]);
    assert_eq!(obj1, obj2);
    assert_ne!(obj1, obj3);
}

#[test]
fn test_interner_boolean_literals_are_not_generic_literals() {
    let interner = TypeInterner::new();
    assert_eq!(interner.literal_boolean(true), TypeId::TRUE);
    assert_eq!(interner.literal_boolean(false), TypeId::FALSE);
    assert!(!matches!(
        interner.lookup(TypeId::TRUE),
        Some(TypeData::Literal(_))
    ));
}

#[test]
fn test_union_flattens_and_dedupes() {
    let mut interner = TypeInterner::new();

    let inner = interner.union(vec![TypeId::STRING, TypeId::NUMBER]);
    let outer = interner.union(vec![inner, TypeId::NULL, TypeId::STRING]);

    match interner.lookup(outer) {
        Some(TypeData::Union(members)) => {
            assert_eq!(members, &vec![TypeId::STRING, TypeId::NUMBER, TypeId::NULL]);
        }
        other => panic!("Expected union, got {:?}", other),
    }
}

#[test]
fn test_union_single_and_empty() {
    let mut interner = TypeInterner::new();

    assert_eq!(
        interner.union(vec![TypeId::NUMBER, TypeId::NUMBER]),
        TypeId::NUMBER
    );
    assert_eq!(interner.union(vec![]), TypeId::NEVER);
    assert_eq!(interner.intersection(vec![]), TypeId::UNKNOWN);
    assert_eq!(interner.intersection(vec![TypeId::STRING]), TypeId::STRING);
}

#[test]
fn test_intersection_flattens() {
    let mut interner = TypeInterner::new();

    let a = interner.object(vec![PropertyInfo::new("a", TypeId::NUMBER)]);
    let b = interner.object(vec![PropertyInfo::new("b", TypeId::NUMBER)]);
    let c = interner.object(vec![PropertyInfo::new("c", TypeId::NUMBER)]);
    let ab = interner.intersection(vec![a, b]);
    let abc = interner.intersection(vec![ab, c, a]);

    match interner.lookup(abc) {
        Some(TypeData::Intersection(members)) => assert_eq!(members, &vec![a, b, c]),
        other => panic!("Expected intersection, got {:?}", other),
    }
}

#[test]
fn test_tuple_records_min_length() {
    let mut interner = TypeInterner::new();

    let tuple = interner.tuple(vec![
        TupleElement::required(TypeId::NUMBER),
        TupleElement::optional(TypeId::STRING),
    ]);
    match interner.lookup(tuple) {
        Some(TypeData::Tuple(shape)) => {
            assert_eq!(shape.min_length, 1);
            assert_eq!(shape.max_length(), 2);
        }
        other => panic!("Expected tuple, got {:?}", other),
    }
}

#[test]
fn test_type_params_have_distinct_identities() {
    let mut interner = TypeInterner::new();

    let (t1, t1_type) = interner.type_param("T");
    let (t2, t2_type) = interner.type_param("T");
    assert_ne!(t1, t2);
    assert_ne!(t1_type, t2_type);

    interner.set_type_param_default(t2, TypeId::STRING);
    assert_eq!(interner.type_param_info(t1).unwrap().default, None);
    assert_eq!(
        interner.type_param_info(t2).unwrap().default,
        Some(TypeId::STRING)
    );
}

#[test]
fn test_self_referential_definition() {
    let mut interner = TypeInterner::new();

    let node = interner.declare("Node", []);
    let self_ref = interner.reference(node, vec![]);
    let body = interner.object(vec![PropertyInfo::new("child", self_ref)]);
    interner.define(node, body);

    let definition = interner.definition(node).unwrap();
    assert_eq!(definition.name, "Node");
    assert_eq!(definition.body, Some(body));
    assert!(!definition.is_generic());
    assert_eq!(
        interner.lookup(self_ref),
        Some(&TypeData::Reference {
            target: node,
            args: vec![]
        })
    );
}

#[test]
fn test_definition_bases_and_shared_names() {
    let mut interner = TypeInterner::new();

    let (t, t_type) = interner.type_param("T");
    let base = interner.declare("Base", [t]);
    let derived = interner.declare("Derived", []);
    let base_ref = interner.reference(base, vec![TypeId::NUMBER]);
    interner.add_base(derived, base_ref);
    let base_body = interner.object(vec![PropertyInfo::new("value", t_type)]);
    interner.define(base, base_body);

    assert_eq!(interner.definition(derived).unwrap().bases, vec![base_ref]);
    assert!(interner.definition(base).unwrap().is_generic());
    assert!(!interner.definitions().is_name_shared("Base"));

    interner.declare("Base", []);
    assert!(interner.definitions().is_name_shared("Base"));
    assert_eq!(interner.definitions().len(), 3);
}

#[test]
fn test_alias_helper() {
    let mut interner = TypeInterner::new();

    let alias = interner.alias("Id", TypeId::STRING);
    match interner.lookup(alias) {
        Some(TypeData::Reference { target, args }) => {
            assert!(args.is_empty());
            assert_eq!(
                interner.definition(*target).unwrap().body,
                Some(TypeId::STRING)
            );
        }
        other => panic!("Expected reference, got {:?}", other),
    }
}
