//! Shape contract engine.
//!
//! This module turns untyped JSON into strongly-typed Rust values. A
//! [`Contract`] reads declared fields through an [`ObjectReader`], applies
//! field-level defaults only when a key is absent, drops keys it never
//! asked for, and records every [`Violation`] it meets instead of stopping
//! at the first one. Untagged unions are resolved by ordered [`Trial`];
//! tagged unions dispatch on a literal discriminator.

mod contract;
mod cursor;
mod diagnostic;
mod error;
pub mod field;
mod format;
mod literal;
mod loader;
mod newtypes;
mod path;
mod reader;
mod union;
mod value;

pub use contract::{Contract, normalize, parse_input, parse_lenient, parse_strict};
pub use cursor::Cursor;
pub use diagnostic::{
    Constraint, SourceDiagnostic, SourceDiagnosticCode, SourceLocation, Violation, ViolationCode,
    ViolationList,
};
pub use error::ContractError;
pub use field::Field;
pub use format::Format;
pub use literal::Literal;
pub(crate) use literal::literal_set;
pub use loader::{parse_json_str, parse_json_str_with_source};
pub use newtypes::{DecimalString, InvalidDecimal};
pub use path::{FieldPath, Segment};
pub use reader::ObjectReader;
pub use union::Trial;
pub use value::describe;
