//! Schema-driven field derivation and validation for tool annotation
//! editing.
//!
//! The set of editable fields, their types, formats and enumerated values
//! are not known at build time: a single schema document delivered at
//! runtime describes all of them. This crate derives a per-field
//! validation schema from that document, exposes the UI hints the editing
//! surface needs, and validates arbitrary user input with categorized,
//! human-readable error messages.

pub mod diagnostics;
pub mod input;
pub mod schema;
pub mod text;
pub mod validate;

pub type Result<T> = anyhow::Result<T>;

pub use input::{InputStore, InputValue};
pub use schema::{
    derive_field_schema, FieldSchema, FieldView, InputKind, SchemaDocument, SchemaRegistry,
    SelectOption,
};
pub use validate::{ValidationOutcome, Validator};
