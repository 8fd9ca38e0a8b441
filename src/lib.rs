//! `impact-contracts`: shape contracts for corporate impact reporting.
//!
//! The crate validates untyped JSON (request bodies, database rows) against
//! named shapes for campaign metrics snapshots, program impact tiles,
//! slide decks and their exports, AI-generated reports and what-if
//! scenarios. Validation applies declared defaults, strips unknown fields
//! and reports every violation in one pass.

/// Shape contract engine: field specs, object reading, unions, violations.
pub mod schema;

/// Concrete contracts for the reporting domain.
pub mod contracts;
