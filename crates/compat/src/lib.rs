//! Schema compatibility checking.
//!
//! The governance contract for schema evolution: within a major version,
//! changes must be additive only. This crate makes the rule mechanically
//! checkable: [`registry::current`] describes the shipped surface as data,
//! and [`checker::review`] gates a proposed revision against a previous
//! snapshot.

pub mod checker;
pub mod model;
pub mod registry;

pub use checker::{Change, CompatReport, CompatibilityError, Verdict, check, review};
pub use model::{EnumDescriptor, FieldDescriptor, FieldKind, RecordDescriptor, SchemaSet};
