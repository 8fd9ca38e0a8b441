//! Shape contracts of the impact-reporting API.
//!
//! Each submodule owns one entity family. Every public shape implements
//! [`Contract`](crate::schema::Contract) and can be validated with
//! [`parse_strict`](crate::schema::parse_strict).

pub mod common;
pub mod deck;
pub mod report;
pub mod scenario;
pub mod snapshot;
pub mod tile;
