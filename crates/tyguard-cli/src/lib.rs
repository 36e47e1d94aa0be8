//! Command-line front end: `tyguard compile`, `tyguard check` and
//! `tyguard names` over JSON type documents.

pub mod args;
pub mod config;
pub mod driver;
pub mod reporter;
