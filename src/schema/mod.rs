//! Schema layer: document shapes, named-schema registry, field derivation.
//!
//! This module is intentionally separate from input state and validation.
//! It owns:
//! - raw document shapes as fetched from the backend (serde-friendly)
//! - the registry of named schemas (`$ref` resolution, enum lookup)
//! - per-field schema derivation and UI hints

pub mod derive;
pub mod document;
pub mod registry;

pub use derive::{
    derive_field_schema, FieldView, InputKind, SelectOption, REPOSITORY_FIELD,
};
pub use document::{FieldSchema, SchemaDocument};
pub use registry::{SchemaRegistry, ANNOTATIONS_SCHEMA};
