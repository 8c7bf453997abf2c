//! Field input validation against derived schemas.
//!
//! Each validation request is a pure function of the schema, the input,
//! the field's array-ness and the registry's current contents. The outcome
//! is always returned as data; nothing is ever thrown past this boundary.
//! A schema that cannot be compiled deliberately fails OPEN: an
//! unparseable constraint must never block the user from submitting.

use crate::diagnostics;
use crate::schema::document::FieldSchema;
use crate::schema::registry::SchemaRegistry;
use crate::schema::REPOSITORY_FIELD;

use jsonschema::error::ValidationErrorKind;
use serde_json::Value;
use url::Url;

/// Default message for an empty array-typed input in the task editor.
pub const EMPTY_LIST_MESSAGE: &str = "At least one item is required";

/// Alternate message used by general-purpose callers.
pub const EMPTY_INPUT_MESSAGE: &str = "Input cannot be empty";

/// Validity flag plus at most one human-readable error. Recomputed fully
/// on every request, never cached across derived schemas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl ValidationOutcome {
    pub fn valid() -> Self {
        ValidationOutcome {
            is_valid: true,
            error: None,
        }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        ValidationOutcome {
            is_valid: false,
            error: Some(error.into()),
        }
    }
}

/// Compiles derived field schemas and classifies failures.
#[derive(Debug, Clone)]
pub struct Validator {
    empty_list_message: String,
}

impl Default for Validator {
    fn default() -> Self {
        Validator {
            empty_list_message: EMPTY_LIST_MESSAGE.to_string(),
        }
    }
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the message reported for an empty array-typed input.
    pub fn with_empty_list_message(message: impl Into<String>) -> Self {
        Validator {
            empty_list_message: message.into(),
        }
    }

    /// Validate `input` for `field_name` against a derived schema.
    ///
    /// `schema` may be `None` (unknown field, no constraints), a schema
    /// produced by `derive_field_schema`, or a raw field schema straight
    /// from the document; both historical nullable-wrapper shapes are
    /// accepted. The contract is total: this never panics and never
    /// returns an error, only an outcome.
    pub fn validate(
        &self,
        field_name: &str,
        schema: Option<&FieldSchema>,
        input: &Value,
        is_array_type: bool,
        registry: &SchemaRegistry,
    ) -> ValidationOutcome {
        // No constraints available: always valid, custom rules included.
        let Some(schema) = schema else {
            return ValidationOutcome::valid();
        };

        let normalized = normalize(schema, registry);
        if let Some(outcome) = self.check_schema(field_name, &normalized, input) {
            return outcome;
        }

        // Custom rule: array-typed fields require at least one item even
        // when the schema alone accepts an empty list.
        if is_array_type {
            if let Value::Array(items) = input {
                if items.is_empty() {
                    return ValidationOutcome::invalid(self.empty_list_message.clone());
                }
            }
        }

        // Custom rule: repository must parse as an absolute URL, even when
        // the generic uri format check passed or was absent.
        if field_name == REPOSITORY_FIELD {
            if let Value::String(s) = input {
                if Url::parse(s).is_err() {
                    return ValidationOutcome::invalid("Invalid URL format for repository");
                }
            }
        }

        ValidationOutcome::valid()
    }

    /// Compile and run the schema-level predicate. Returns `Some` only for
    /// a constraint violation; compile failures fail open.
    fn check_schema(
        &self,
        field_name: &str,
        schema: &FieldSchema,
        input: &Value,
    ) -> Option<ValidationOutcome> {
        let schema_value = match serde_json::to_value(schema) {
            Ok(v) => v,
            Err(e) => {
                diagnostics::warn(format!(
                    "cannot serialize schema for field '{}': {}",
                    field_name, e
                ));
                return None;
            }
        };

        let compiled = match jsonschema::options()
            .should_validate_formats(true)
            .build(&schema_value)
        {
            Ok(v) => v,
            Err(e) => {
                // Fail open: an unparseable constraint never blocks input.
                diagnostics::warn(format!(
                    "cannot compile schema for field '{}': {}",
                    field_name, e
                ));
                return None;
            }
        };

        let errors: Vec<_> = compiled.iter_errors(input).collect();
        if errors.is_empty() {
            return None;
        }

        // Classify: format failures first, then pattern, then generic.
        for error in &errors {
            if let ValidationErrorKind::Format { format } = &error.kind {
                return Some(ValidationOutcome::invalid(format!(
                    "Input must be a valid {}",
                    format
                )));
            }
        }
        for error in &errors {
            if let ValidationErrorKind::Pattern { pattern } = &error.kind {
                return Some(ValidationOutcome::invalid(format!(
                    "Input must match pattern \"{}\"",
                    pattern
                )));
            }
        }
        Some(ValidationOutcome::invalid("Invalid input"))
    }
}

/// Rewrite a schema into the self-contained form the compiler needs.
///
/// Both historical nullable wrappers are accepted: the derivation-level
/// `oneOf [null, X]` and the raw-caller `allOf [null, X]` shape (or a bare
/// `nullable: true` marker). All of them normalize to `oneOf [null, X']`
/// where `X'` has every `$ref` inlined from the registry.
fn normalize(schema: &FieldSchema, registry: &SchemaRegistry) -> FieldSchema {
    if let Some(inner) = nullable_wrapper_inner(schema) {
        return wrap_nullable(normalize_core(inner, registry));
    }

    let mut core = normalize_core(schema, registry);
    if core.nullable.take() == Some(true) {
        return wrap_nullable(core);
    }
    core
}

/// Inner branch of a nullable wrapper, whichever shape it uses.
fn nullable_wrapper_inner(schema: &FieldSchema) -> Option<&FieldSchema> {
    let branches = schema.one_of.as_ref().or(schema.all_of.as_ref())?;
    match branches.as_slice() {
        [null_branch, inner] if null_branch.is_null_type() => Some(inner),
        _ => None,
    }
}

fn wrap_nullable(inner: FieldSchema) -> FieldSchema {
    FieldSchema {
        one_of: Some(vec![FieldSchema::typed("null"), inner]),
        ..Default::default()
    }
}

/// Flatten one schema branch:
/// - `allOf` collapses into `{type: "string", enum: union of resolved
///   `$ref` enums}`; entries without a `$ref` contribute nothing, and the
///   rewrite drops any leftover `nullable` marker.
/// - `items.$ref` is inlined (unresolvable refs become no constraint).
/// - `type` defaults to `"string"`.
/// - the `$id` identity tag is stripped; the compiled schema must be
///   self-contained.
fn normalize_core(schema: &FieldSchema, registry: &SchemaRegistry) -> FieldSchema {
    let mut out = schema.clone();
    out.id = None;

    if let Some(entries) = out.all_of.take() {
        let mut members = Vec::new();
        for entry in &entries {
            if let Some(pointer) = &entry.reference {
                members.extend(registry.enum_values_of_ref(pointer));
            }
        }
        out = FieldSchema {
            schema_type: Some("string".to_string()),
            enum_values: Some(members),
            ..Default::default()
        };
    }

    if let Some(items) = out.items.take() {
        out.items = Some(Box::new(inline_ref(&items, registry)));
    }

    if out.schema_type.is_none() {
        out.schema_type = Some("string".to_string());
    }

    out
}

/// Replace a `$ref`-bearing fragment with the named schema it points to;
/// an unresolvable ref becomes the empty schema (no constraint).
fn inline_ref(fragment: &FieldSchema, registry: &SchemaRegistry) -> FieldSchema {
    match &fragment.reference {
        Some(pointer) => match registry.resolve_ref(pointer) {
            Some(resolved) => {
                let mut inlined = resolved.clone();
                inlined.id = None;
                inlined
            }
            None => FieldSchema::default(),
        },
        None => fragment.clone(),
    }
}
