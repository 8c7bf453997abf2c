//! Per-task draft input store.
//!
//! Holds the user's in-progress value for each task until the task is
//! submitted or the task list is replaced wholesale. Array-typed fields
//! always read as a list once initialized; scalars read as a string.

use serde_json::Value;
use std::collections::BTreeMap;

/// A draft value: a single string or an ordered list of strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputValue {
    Text(String),
    List(Vec<String>),
}

impl InputValue {
    pub fn empty_text() -> Self {
        InputValue::Text(String::new())
    }

    pub fn empty_list() -> Self {
        InputValue::List(Vec::new())
    }

    /// JSON value handed to the validator.
    pub fn to_json(&self) -> Value {
        match self {
            InputValue::Text(s) => Value::String(s.clone()),
            InputValue::List(items) => {
                Value::Array(items.iter().cloned().map(Value::String).collect())
            }
        }
    }
}

/// Draft inputs keyed by task identity, plus the pending validation error
/// shown for the active task.
#[derive(Debug, Clone, Default)]
pub struct InputStore {
    inputs: BTreeMap<String, InputValue>,
    validation_error: Option<String>,
}

impl InputStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current draft for a task. Uninitialized array fields read as an
    /// empty list, uninitialized scalar fields as an empty string; a
    /// non-list stored under an array field also reads as an empty list.
    pub fn get(&self, task_id: &str, is_array_type: bool) -> InputValue {
        match (self.inputs.get(task_id), is_array_type) {
            (Some(InputValue::List(items)), true) => InputValue::List(items.clone()),
            (_, true) => InputValue::empty_list(),
            (Some(value), false) => value.clone(),
            (None, false) => InputValue::empty_text(),
        }
    }

    pub fn set(&mut self, task_id: &str, value: InputValue) {
        self.inputs.insert(task_id.to_string(), value);
    }

    /// Append an empty item to an array draft. No-op for scalar fields.
    pub fn add_array_item(&mut self, task_id: &str, is_array_type: bool) {
        if !is_array_type {
            return;
        }
        let mut items = match self.get(task_id, true) {
            InputValue::List(items) => items,
            InputValue::Text(_) => Vec::new(),
        };
        items.push(String::new());
        self.inputs
            .insert(task_id.to_string(), InputValue::List(items));
    }

    /// Remove one item from an array draft, preserving the order of the
    /// rest. No-op for scalar fields or an out-of-bounds index.
    pub fn remove_array_item(&mut self, task_id: &str, index: usize, is_array_type: bool) {
        if !is_array_type {
            return;
        }
        if let Some(InputValue::List(items)) = self.inputs.get_mut(task_id) {
            if index < items.len() {
                items.remove(index);
            }
        }
    }

    /// Drop all drafts and any pending validation error. Called when the
    /// active task list is replaced wholesale.
    pub fn reset(&mut self) {
        self.inputs.clear();
        self.validation_error = None;
    }

    pub fn validation_error(&self) -> Option<&str> {
        self.validation_error.as_deref()
    }

    pub fn set_validation_error(&mut self, error: impl Into<String>) {
        self.validation_error = Some(error.into());
    }

    pub fn clear_validation_error(&mut self) {
        self.validation_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn uninitialized_reads_default_by_field_shape() {
        let store = InputStore::new();
        assert_eq!(store.get("7", true), InputValue::empty_list());
        assert_eq!(store.get("7", false), InputValue::empty_text());
    }

    #[test]
    fn scalar_stored_under_an_array_field_reads_as_empty_list() {
        let mut store = InputStore::new();
        store.set("7", InputValue::Text("oops".to_string()));
        assert_eq!(store.get("7", true), InputValue::empty_list());
    }

    #[test]
    fn add_array_item_appends_an_empty_string() {
        let mut store = InputStore::new();
        store.add_array_item("7", true);
        store.add_array_item("7", true);
        assert_eq!(
            store.get("7", true),
            InputValue::List(vec![String::new(), String::new()])
        );

        // Scalar fields are untouched.
        store.add_array_item("8", false);
        assert_eq!(store.get("8", false), InputValue::empty_text());
    }

    #[test]
    fn remove_array_item_preserves_order_and_ignores_out_of_bounds() {
        let mut store = InputStore::new();
        store.set(
            "7",
            InputValue::List(vec!["a".into(), "b".into(), "c".into()]),
        );

        store.remove_array_item("7", 1, true);
        assert_eq!(
            store.get("7", true),
            InputValue::List(vec!["a".to_string(), "c".to_string()])
        );

        store.remove_array_item("7", 9, true);
        store.remove_array_item("7", 0, false);
        assert_eq!(
            store.get("7", true),
            InputValue::List(vec!["a".to_string(), "c".to_string()])
        );
    }

    #[test]
    fn reset_clears_drafts_and_pending_error() {
        let mut store = InputStore::new();
        store.set("7", InputValue::Text("x".to_string()));
        store.set_validation_error("Invalid input");

        store.reset();
        assert_eq!(store.get("7", false), InputValue::empty_text());
        assert_eq!(store.validation_error(), None);
    }

    #[test]
    fn to_json_shapes() {
        assert_eq!(
            InputValue::Text("x".to_string()).to_json(),
            serde_json::json!("x")
        );
        assert_eq!(
            InputValue::List(vec!["a".to_string()]).to_json(),
            serde_json::json!(["a"])
        );
    }
}
