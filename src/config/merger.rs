//! Deep merge algorithm for rule option values.
//!
//! Rule configuration is layered: a partial update is merged over whatever
//! options a rule already has. This module implements the merge semantics.
//!
//! # Merge Rules
//!
//! - Objects are merged recursively
//! - Arrays are replaced entirely (not merged)
//! - Null values in overlay delete the corresponding key from base
//! - Scalars in overlay replace scalars in base

use serde_json::{Map, Value};

/// Deep merge two JSON values.
///
/// Later values override earlier values at the point of conflict.
/// Objects are merged recursively. Arrays are replaced entirely.
/// Null values in overlay delete the corresponding key from base.
///
/// # Arguments
///
/// * `base` - The existing value
/// * `overlay` - The update (takes precedence)
///
/// # Returns
///
/// A new Value with merged contents
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            Value::Object(merge_maps(base_map, overlay_map))
        }

        // Overlay is not an object, or base is not an object: overlay wins
        (_, overlay) => overlay.clone(),
    }
}

/// Deep merge two option maps. See [`deep_merge`].
pub fn merge_maps(base: &Map<String, Value>, overlay: &Map<String, Value>) -> Map<String, Value> {
    let mut result = base.clone();

    for (key, overlay_value) in overlay {
        if overlay_value.is_null() {
            // Null in overlay = delete from result
            result.shift_remove(key);
        } else if let Some(base_value) = base.get(key) {
            result.insert(key.clone(), deep_merge(base_value, overlay_value));
        } else {
            result.insert(key.clone(), overlay_value.clone());
        }
    }

    result
}
