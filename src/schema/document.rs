//! Raw schema document shapes as delivered by the annotations service.
//!
//! JSON shape:
//! {
//!   "schemas": {
//!     "Annotations": {
//!       "properties": {
//!         "tool_type": { "allOf": [{ "$ref": "#/schemas/ToolType" }], "nullable": true },
//!         "repository": { "type": "string" },
//!         ...
//!       }
//!     },
//!     "ToolType": { "enum": ["web_app", "desktop_app"] },
//!     ...
//!   }
//! }
//!
//! One recursive shape covers named top-level schemas, per-field schemas
//! under `Annotations.properties`, and nested fragments (`items`, `allOf`
//! and `oneOf` members). Keys outside the modeled subset are carried in
//! `extra` untouched so unknown document revisions still deserialize.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// The whole schema document fetched from the backend.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaDocument {
    #[serde(default)]
    pub schemas: BTreeMap<String, FieldSchema>,
}

/// One schema node from the document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct FieldSchema {
    /// Identity tag set during derivation; UI-facing only.
    #[serde(rename = "$id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Pointer to a named schema, e.g. "#/schemas/ToolType".
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,

    /// Item schema when `type == "array"`; may carry its own `$ref`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<FieldSchema>>,

    #[serde(rename = "allOf", default, skip_serializing_if = "Option::is_none")]
    pub all_of: Option<Vec<FieldSchema>>,

    #[serde(rename = "oneOf", default, skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<FieldSchema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Present on the reserved `Annotations` schema: field name -> schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, FieldSchema>>,

    /// Keys we do not model, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FieldSchema {
    /// A schema constraining only the JSON type, e.g. `{"type": "null"}`.
    pub fn typed(schema_type: &str) -> Self {
        FieldSchema {
            schema_type: Some(schema_type.to_string()),
            ..Default::default()
        }
    }

    pub fn is_array(&self) -> bool {
        self.schema_type.as_deref() == Some("array")
    }

    /// True for the `{"type": "null"}` branch used by nullable wrappers.
    pub fn is_null_type(&self) -> bool {
        self.schema_type.as_deref() == Some("null")
            && self.reference.is_none()
            && self.enum_values.is_none()
            && self.all_of.is_none()
            && self.one_of.is_none()
    }
}
