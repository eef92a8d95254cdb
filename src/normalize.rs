//! Shape normalization for Tradier response bodies.
//!
//! The API does not encode collections consistently. Depending on the
//! endpoint and the number of results, a collection such as
//! `{"orders": {"order": [...]}}` may instead arrive as:
//!
//! - `{"orders": "null"}`: the string sentinel for "no items"
//! - `{"orders": null}` or `{"orders": []}`
//! - `{"orders": {}}`: the container without its item key
//! - `{"orders": {"order": {...}}}`: a single item not wrapped in a list
//!
//! [`normalize`] rewrites every one of these into the canonical
//! `{"orders": {"order": [...]}}` so the typed models only ever see lists.
//! It is pure and idempotent.

use serde_json::{Map, Value};

/// The literal the API uses in place of an empty container.
pub const NULL_SENTINEL: &str = "null";

/// Derive the default item key for a container key.
///
/// `"orders"` → `"order"`, `"securities"` → `"security"`.
pub fn item_key_for(container_key: &str) -> String {
    if let Some(stem) = container_key.strip_suffix("ies") {
        format!("{stem}y")
    } else if let Some(stem) = container_key.strip_suffix('s') {
        stem.to_string()
    } else {
        container_key.to_string()
    }
}

/// Returns `true` if the value stands for "nothing here".
pub fn is_empty_marker(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s == NULL_SENTINEL,
        _ => false,
    }
}

/// Normalize `raw[container_key][item_key]` into a list.
///
/// `item_key` defaults to [`item_key_for`]`(container_key)`. A body that is
/// not an object, or that lacks `container_key` entirely, is returned
/// unchanged: the absence is left for the caller to report.
pub fn normalize(mut raw: Value, container_key: &str, item_key: Option<&str>) -> Value {
    normalize_in_place(&mut raw, container_key, item_key);
    raw
}

/// In-place form of [`normalize`].
pub fn normalize_in_place(raw: &mut Value, container_key: &str, item_key: Option<&str>) {
    let item_key = match item_key {
        Some(key) => key.to_string(),
        None => item_key_for(container_key),
    };

    let Some(container) = raw.as_object_mut().and_then(|o| o.get_mut(container_key)) else {
        return;
    };

    *container = match container.take() {
        v if is_empty_marker(&v) => container_with(&item_key, Vec::new()),
        Value::Array(items) => container_with(&item_key, items),
        Value::Object(mut fields) => {
            let entry = fields.entry(item_key).or_insert(Value::Null);
            into_list(entry);
            Value::Object(fields)
        }
        // Scalars other than the sentinel are a server contract violation;
        // leave them for the typed layer to reject.
        other => other,
    };
}

/// Normalize `raw[key]` into a flat list (no item key).
///
/// Used for collections the API returns directly under their key, such as
/// `{"symbols": [...]}`. A missing key is left missing.
pub fn normalize_flat(raw: &mut Value, key: &str) {
    if let Some(value) = raw.as_object_mut().and_then(|o| o.get_mut(key)) {
        into_list(value);
    }
}

/// Normalize `raw[key]` into a list only when the key is present and not
/// an empty marker.
///
/// Used for optional nested collections such as an order's `leg` field,
/// where absence means "not applicable" rather than "empty".
pub fn normalize_optional(raw: &mut Value, key: &str) {
    let Some(fields) = raw.as_object_mut() else {
        return;
    };
    let empty = match fields.get(key) {
        Some(v) => is_empty_marker(v),
        None => return,
    };
    if empty {
        fields.remove(key);
    } else if let Some(v) = fields.get_mut(key) {
        into_list(v);
    }
}

/// Apply `f` to every element of `raw[container_key][item_key]`.
///
/// Call after [`normalize`] so the items are known to be a list.
pub fn for_each_item(
    raw: &mut Value,
    container_key: &str,
    item_key: &str,
    mut f: impl FnMut(&mut Value),
) {
    if let Some(Value::Array(items)) = raw
        .get_mut(container_key)
        .and_then(|c| c.get_mut(item_key))
    {
        items.iter_mut().for_each(&mut f);
    }
}

fn container_with(item_key: &str, items: Vec<Value>) -> Value {
    let mut fields = Map::new();
    fields.insert(item_key.to_string(), Value::Array(items));
    Value::Object(fields)
}

fn into_list(value: &mut Value) {
    if value.is_array() {
        return;
    }
    let single = value.take();
    *value = if is_empty_marker(&single) {
        Value::Array(Vec::new())
    } else {
        Value::Array(vec![single])
    };
}
