//! Per-field schema derivation and UI hints.
//!
//! Given the registry and the name of the field currently being edited,
//! produce the effective validation schema for that single field plus the
//! presentation metadata the editing surface needs (input kind,
//! placeholder, select options, description).

use crate::schema::document::FieldSchema;
use crate::schema::registry::SchemaRegistry;
use crate::text::to_human_readable;

/// Field subject to the hard-coded URL rules; not derivable from the
/// schema document.
pub const REPOSITORY_FIELD: &str = "repository";

/// Derive the validation schema for one field.
///
/// Returns `None` when the field is unknown under `Annotations.properties`;
/// the caller treats an editing target with no schema as "always valid, no
/// constraints" rather than an error.
pub fn derive_field_schema(
    registry: &SchemaRegistry,
    field_name: &str,
) -> Option<FieldSchema> {
    let raw = registry.field_schema(field_name)?;

    let mut derived = raw.clone();
    derived.id = Some(format!("#/fieldSchema/{}", field_name));

    // Nullable fields become a union: explicitly null, or the original
    // constraints with the nullable marker stripped from the inner branch.
    if derived.nullable == Some(true) {
        let mut inner = derived;
        inner.nullable = None;
        derived = FieldSchema {
            one_of: Some(vec![FieldSchema::typed("null"), inner]),
            ..Default::default()
        };
    }

    // Domain rule: the repository field is always a URI, whatever the
    // document says.
    if field_name == REPOSITORY_FIELD {
        derived.format = Some("uri".to_string());
    }

    Some(derived)
}

/// Rendering kind for a field's input widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Url,
    Checkbox,
    LanguageUrl,
    Text,
}

impl InputKind {
    pub fn as_str(self) -> &'static str {
        match self {
            InputKind::Url => "url",
            InputKind::Checkbox => "checkbox",
            InputKind::LanguageUrl => "languageUrl",
            InputKind::Text => "text",
        }
    }
}

/// Presentation convention for one known field name.
struct FieldPresentation {
    kind: InputKind,
    placeholder: Option<&'static str>,
}

/// Domain convention, not derivable from the schema document. Fields
/// absent from this table fall back to `text` / "Enter <field_name>".
const FIELD_PRESENTATION: &[(&str, FieldPresentation)] = &[
    (
        "repository",
        FieldPresentation {
            kind: InputKind::Url,
            placeholder: Some(
                "Enter repository URL (e.g., https://github.com/username/repository)",
            ),
        },
    ),
    (
        "api_url",
        FieldPresentation {
            kind: InputKind::Url,
            placeholder: Some("Enter API URL"),
        },
    ),
    (
        "bugtracker_url",
        FieldPresentation {
            kind: InputKind::Url,
            placeholder: Some("Enter bug tracker URL"),
        },
    ),
    (
        "translate_url",
        FieldPresentation {
            kind: InputKind::Url,
            placeholder: Some("Enter translation interface URL"),
        },
    ),
    (
        "deprecated",
        FieldPresentation {
            kind: InputKind::Checkbox,
            placeholder: None,
        },
    ),
    (
        "experimental",
        FieldPresentation {
            kind: InputKind::Checkbox,
            placeholder: None,
        },
    ),
    (
        "user_docs_url",
        FieldPresentation {
            kind: InputKind::LanguageUrl,
            placeholder: Some("Enter user documentation URL"),
        },
    ),
    (
        "developer_docs_url",
        FieldPresentation {
            kind: InputKind::LanguageUrl,
            placeholder: Some("Enter developer documentation URL"),
        },
    ),
    (
        "icon",
        FieldPresentation {
            kind: InputKind::Text,
            placeholder: Some(
                "Enter icon URL (e.g., https://commons.wikimedia.org/wiki/File:some_tool_logo_mini.svg)",
            ),
        },
    ),
    (
        "wikidata_qid",
        FieldPresentation {
            kind: InputKind::Text,
            placeholder: Some("Enter wikidata ID (e.g., Q43649390)"),
        },
    ),
];

fn presentation_of(field_name: &str) -> Option<&'static FieldPresentation> {
    FIELD_PRESENTATION
        .iter()
        .find(|(name, _)| *name == field_name)
        .map(|(_, p)| p)
}

/// One entry of a select-style option list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Everything the editing surface needs to know about one field.
///
/// Computed once per active-field change; validation re-reads the registry
/// on every request, but these hints are stable until the field changes.
#[derive(Debug, Clone)]
pub struct FieldView {
    pub field_name: String,
    /// Derived validation schema, `None` for unknown fields.
    pub schema: Option<FieldSchema>,
    pub is_array_type: bool,
    pub description: String,
    pub input_options: Vec<SelectOption>,
    pub input_kind: InputKind,
    pub placeholder: String,
}

impl FieldView {
    pub fn new(registry: &SchemaRegistry, field_name: &str) -> Self {
        let raw = registry.field_schema(field_name);

        let is_array_type = raw.map(FieldSchema::is_array).unwrap_or(false);

        let description = raw
            .and_then(|s| s.description.clone())
            .unwrap_or_else(|| format!("Enter {}", to_human_readable(field_name)));

        let input_options = raw
            .map(|s| input_options(registry, s))
            .unwrap_or_default();

        let (input_kind, placeholder) = match presentation_of(field_name) {
            Some(p) => (
                p.kind,
                p.placeholder
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Enter {}", field_name)),
            ),
            None => (InputKind::Text, format!("Enter {}", field_name)),
        };

        FieldView {
            field_name: field_name.to_string(),
            schema: derive_field_schema(registry, field_name),
            is_array_type,
            description,
            input_options,
            input_kind,
            placeholder,
        }
    }
}

/// Option list for enum-backed fields, in document order.
///
/// Array fields take the enum behind `items.$ref`; scalar fields take the
/// enum behind `allOf[0].$ref`. Anything else has no options.
fn input_options(registry: &SchemaRegistry, raw: &FieldSchema) -> Vec<SelectOption> {
    let items_ref = raw
        .items
        .as_ref()
        .and_then(|i| i.reference.as_deref())
        .filter(|_| raw.is_array());
    let all_of_ref = raw
        .all_of
        .as_ref()
        .and_then(|entries| entries.first())
        .and_then(|entry| entry.reference.as_deref());

    let values = match items_ref.or(all_of_ref) {
        Some(pointer) => registry.enum_values_of_ref(pointer),
        None => Vec::new(),
    };

    values
        .into_iter()
        .map(|value| SelectOption {
            label: to_human_readable(&value),
            value,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::document::SchemaDocument;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn registry() -> SchemaRegistry {
        let doc: SchemaDocument = serde_json::from_value(json!({
            "schemas": {
                "Annotations": {
                    "properties": {
                        "repository": {"type": "string"},
                        "deprecated": {"type": "boolean", "description": "Tool is deprecated"},
                        "tool_type": {
                            "allOf": [{"$ref": "#/schemas/ToolType"}],
                            "nullable": true
                        },
                        "audiences": {
                            "type": "array",
                            "items": {"$ref": "#/schemas/Audience"}
                        },
                        "orphan": {
                            "type": "array",
                            "items": {"$ref": "#/schemas/Missing"}
                        }
                    }
                },
                "ToolType": {"enum": ["web_app", "desktop_app"]},
                "Audience": {"enum": ["a", "b"]}
            }
        }))
        .unwrap();
        SchemaRegistry::from_document(doc)
    }

    #[test]
    fn unknown_field_derives_no_schema() {
        assert!(derive_field_schema(&registry(), "nope").is_none());
    }

    #[test]
    fn derived_schema_carries_an_identity_tag() {
        let derived = derive_field_schema(&registry(), "deprecated").unwrap();
        assert_eq!(derived.id.as_deref(), Some("#/fieldSchema/deprecated"));
        assert_eq!(derived.schema_type.as_deref(), Some("boolean"));
    }

    #[test]
    fn nullable_fields_become_a_null_union() {
        let derived = derive_field_schema(&registry(), "tool_type").unwrap();
        let branches = derived.one_of.as_ref().unwrap();
        assert_eq!(branches.len(), 2);
        assert!(branches[0].is_null_type());

        // Inner branch keeps the constraints but drops the nullable marker.
        assert_eq!(branches[1].nullable, None);
        assert!(branches[1].all_of.is_some());
        assert_eq!(branches[1].id.as_deref(), Some("#/fieldSchema/tool_type"));
    }

    #[test]
    fn repository_format_is_forced_to_uri() {
        let derived = derive_field_schema(&registry(), "repository").unwrap();
        assert_eq!(derived.format.as_deref(), Some("uri"));
    }

    #[test]
    fn array_options_come_from_the_items_ref_in_order() {
        let view = FieldView::new(&registry(), "audiences");
        assert!(view.is_array_type);
        assert_eq!(
            view.input_options,
            vec![
                SelectOption {
                    value: "a".to_string(),
                    label: "A".to_string()
                },
                SelectOption {
                    value: "b".to_string(),
                    label: "B".to_string()
                },
            ]
        );
    }

    #[test]
    fn scalar_options_come_from_the_first_all_of_ref() {
        let view = FieldView::new(&registry(), "tool_type");
        assert_eq!(
            view.input_options,
            vec![
                SelectOption {
                    value: "web_app".to_string(),
                    label: "Web App".to_string()
                },
                SelectOption {
                    value: "desktop_app".to_string(),
                    label: "Desktop App".to_string()
                },
            ]
        );
    }

    #[test]
    fn unresolvable_item_refs_yield_no_options() {
        let view = FieldView::new(&registry(), "orphan");
        assert!(view.input_options.is_empty());
    }

    #[test]
    fn description_prefers_the_schema_then_falls_back() {
        let reg = registry();
        assert_eq!(
            FieldView::new(&reg, "deprecated").description,
            "Tool is deprecated"
        );
        assert_eq!(
            FieldView::new(&reg, "tool_type").description,
            "Enter Tool Type"
        );
    }

    #[test]
    fn presentation_table_covers_known_fields_with_defaults_elsewhere() {
        let reg = registry();

        let repo = FieldView::new(&reg, "repository");
        assert_eq!(repo.input_kind, InputKind::Url);
        assert_eq!(
            repo.placeholder,
            "Enter repository URL (e.g., https://github.com/username/repository)"
        );

        let deprecated = FieldView::new(&reg, "deprecated");
        assert_eq!(deprecated.input_kind, InputKind::Checkbox);
        assert_eq!(deprecated.placeholder, "Enter deprecated");

        let unknown = FieldView::new(&reg, "some_new_field");
        assert_eq!(unknown.input_kind, InputKind::Text);
        assert_eq!(unknown.placeholder, "Enter some_new_field");
        assert!(unknown.schema.is_none());
        // Placeholder uses the raw name, description the readable form.
        assert_eq!(unknown.description, "Enter Some New Field");
    }

    #[test]
    fn input_kind_wire_names() {
        assert_eq!(InputKind::Url.as_str(), "url");
        assert_eq!(InputKind::Checkbox.as_str(), "checkbox");
        assert_eq!(InputKind::LanguageUrl.as_str(), "languageUrl");
        assert_eq!(InputKind::Text.as_str(), "text");
    }
}
