//! Structural merge of style-like values.

use serde_json::{Map, Value};

/// Merges `overlay` onto `base`, returning the combined value.
///
/// Objects merge key by key, recursively. Arrays merge position by
/// position, so an overlay array replaces only the leading entries it has.
/// Any other combination takes the overlay.
///
/// # Example
///
/// ```rust
/// use responsive_stylesheet::deep_merge;
/// use serde_json::json;
///
/// let merged = deep_merge(json!({ "a": 1, "b": { "c": 1 } }), json!({ "b": { "d": 2 } }));
/// assert_eq!(merged, json!({ "a": 1, "b": { "c": 1, "d": 2 } }));
///
/// assert_eq!(deep_merge(json!([1, 2]), json!([9])), json!([9, 2]));
/// ```
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => Value::Object(merge_maps(base, overlay)),
        (Value::Array(mut base), Value::Array(overlay)) => {
            for (i, item) in overlay.into_iter().enumerate() {
                if i < base.len() {
                    let existing = std::mem::take(&mut base[i]);
                    base[i] = deep_merge(existing, item);
                } else {
                    base.push(item);
                }
            }
            Value::Array(base)
        }
        (_, overlay) => overlay,
    }
}

/// [`deep_merge`] specialised to objects.
pub fn merge_maps(mut base: Map<String, Value>, overlay: Map<String, Value>) -> Map<String, Value> {
    for (key, value) in overlay {
        match base.get_mut(&key) {
            Some(existing) => {
                let current = std::mem::take(existing);
                *existing = deep_merge(current, value);
            }
            None => {
                base.insert(key, value);
            }
        }
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_objects_merge() {
        let merged = deep_merge(
            json!({ "shadowOffset": { "width": 1, "height": 1 } }),
            json!({ "shadowOffset": { "height": 4 } }),
        );
        assert_eq!(merged, json!({ "shadowOffset": { "width": 1, "height": 4 } }));
    }

    #[test]
    fn test_arrays_merge_positionally() {
        assert_eq!(deep_merge(json!([1, 2]), json!([9])), json!([9, 2]));
        assert_eq!(deep_merge(json!([1]), json!([7, 8])), json!([7, 8]));
        assert_eq!(
            deep_merge(json!([{ "scale": 1 }, { "rotate": "0deg" }]), json!([{}, { "rotate": "9deg" }])),
            json!([{ "scale": 1 }, { "rotate": "9deg" }])
        );
    }

    #[test]
    fn test_scalar_overlay_wins() {
        assert_eq!(deep_merge(json!({ "a": 1 }), json!(3)), json!(3));
        assert_eq!(deep_merge(json!("red"), json!({ "a": 1 })), json!({ "a": 1 }));
    }

    #[test]
    fn test_existing_key_keeps_its_position() {
        let merged = merge_maps(
            json!({ "a": 1, "b": 2 }).as_object().cloned().unwrap_or_default(),
            json!({ "a": 3 }).as_object().cloned().unwrap_or_default(),
        );
        assert_eq!(merged.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(merged["a"], json!(3));
    }
}
