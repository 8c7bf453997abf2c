//! Named-schema registry.
//!
//! Owns every named schema from one document for the lifetime of an
//! editing session. A refetched document replaces the contents wholesale;
//! there is no partial application. Mutation requires `&mut self`, so the
//! borrow checker enforces the single-writer discipline while validation
//! reads interleave freely on `&self`.

use crate::diagnostics;
use crate::schema::document::{FieldSchema, SchemaDocument};
use std::collections::BTreeMap;

/// Reserved name of the schema holding per-field properties.
pub const ANNOTATIONS_SCHEMA: &str = "Annotations";

#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<String, FieldSchema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a full document in one atomic pass.
    pub fn from_document(doc: SchemaDocument) -> Self {
        SchemaRegistry {
            schemas: doc.schemas,
        }
    }

    /// Replace the registry contents wholesale with a new document.
    ///
    /// The document is already fully deserialized when we get here, so the
    /// swap either happens completely or not at all.
    pub fn load_document(&mut self, doc: SchemaDocument) {
        self.schemas = doc.schemas;
    }

    /// Insert a named schema. Registering an already-known name is not an
    /// error: the first registration wins and the duplicate is dropped
    /// with a warning, since a hot reload may re-add known names.
    pub fn register(&mut self, name: &str, schema: FieldSchema) {
        if self.schemas.contains_key(name) {
            diagnostics::warn(format!(
                "schema '{}' is already registered; keeping the existing definition",
                name
            ));
            return;
        }
        self.schemas.insert(name.to_string(), schema);
    }

    pub fn get(&self, name: &str) -> Option<&FieldSchema> {
        self.schemas.get(name)
    }

    /// Resolve a `#/schemas/<Name>` pointer. The final path segment is the
    /// lookup key; an unknown key yields `None` rather than an error.
    pub fn resolve_ref(&self, pointer: &str) -> Option<&FieldSchema> {
        let name = pointer.rsplit('/').next()?;
        self.schemas.get(name)
    }

    /// Enum members of a named schema, empty when the name is unknown or
    /// carries no enum.
    pub fn enum_values_of(&self, name: &str) -> Vec<String> {
        self.schemas
            .get(name)
            .and_then(|s| s.enum_values.clone())
            .unwrap_or_default()
    }

    /// Enum members behind a `$ref` pointer, empty when unresolvable.
    pub fn enum_values_of_ref(&self, pointer: &str) -> Vec<String> {
        self.resolve_ref(pointer)
            .and_then(|s| s.enum_values.clone())
            .unwrap_or_default()
    }

    /// Raw schema for one field under `Annotations.properties`.
    pub fn field_schema(&self, field_name: &str) -> Option<&FieldSchema> {
        self.schemas
            .get(ANNOTATIONS_SCHEMA)?
            .properties
            .as_ref()?
            .get(field_name)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn registry() -> SchemaRegistry {
        let doc: SchemaDocument = serde_json::from_value(json!({
            "schemas": {
                "Annotations": {
                    "properties": {
                        "repository": {"type": "string"}
                    }
                },
                "ToolType": {"enum": ["web_app", "desktop_app"]}
            }
        }))
        .unwrap();
        SchemaRegistry::from_document(doc)
    }

    #[test]
    fn resolve_ref_takes_the_final_path_segment() {
        let reg = registry();
        let resolved = reg.resolve_ref("#/schemas/ToolType").unwrap();
        assert_eq!(
            resolved.enum_values,
            Some(vec!["web_app".to_string(), "desktop_app".to_string()])
        );
    }

    #[test]
    fn unknown_refs_resolve_to_none_not_an_error() {
        let reg = registry();
        assert!(reg.resolve_ref("#/schemas/Missing").is_none());
        assert!(reg.enum_values_of_ref("#/schemas/Missing").is_empty());
    }

    #[test]
    fn register_is_idempotent_and_keeps_the_first_definition() {
        let mut reg = registry();
        let before = reg.enum_values_of("ToolType");

        reg.register("ToolType", FieldSchema::typed("string"));
        assert_eq!(reg.enum_values_of("ToolType"), before);

        // Same name and content leaves resolution behavior unchanged too.
        let same: FieldSchema =
            serde_json::from_value(json!({"enum": ["web_app", "desktop_app"]})).unwrap();
        reg.register("ToolType", same);
        assert_eq!(reg.enum_values_of("ToolType"), before);
    }

    #[test]
    fn load_document_replaces_contents_wholesale() {
        let mut reg = registry();
        assert_eq!(reg.len(), 2);

        let doc: SchemaDocument = serde_json::from_value(json!({
            "schemas": {"Audience": {"enum": ["admin"]}}
        }))
        .unwrap();
        reg.load_document(doc);

        assert_eq!(reg.len(), 1);
        assert!(reg.resolve_ref("#/schemas/ToolType").is_none());
        assert_eq!(reg.enum_values_of("Audience"), vec!["admin".to_string()]);
    }

    #[test]
    fn field_schema_reads_annotations_properties() {
        let reg = registry();
        assert!(reg.field_schema("repository").is_some());
        assert!(reg.field_schema("unknown_field").is_none());
    }
}
