//! Deep merge of JSON option bags.
//!
//! Option bags arrive from several places (built-in defaults, global config,
//! syntax config, project config, per-call options). They are combined
//! left to right: objects merge key by key, any other value replaces what
//! was there before.

use serde_json::{Map, Value};

/// Merges `overlay` into `base`.
///
/// Objects merge recursively; arrays and scalars replace. A `Null` overlay
/// leaves `base` untouched.
pub fn merge_into(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (_, Value::Null) => {}
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(key) {
                    Some(existing) => merge_into(existing, value),
                    None => {
                        if !value.is_null() {
                            base.insert(key.clone(), value.clone());
                        }
                    }
                }
            }
        }
        (base, overlay) => *base = overlay.clone(),
    }
}

/// Merges an ordered list of layers, later layers winning on key collisions.
///
/// The result is always an object. Layers that are not objects are skipped.
pub fn merge_layers<'a, I>(layers: I) -> Value
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut merged = Value::Object(Map::new());
    for layer in layers {
        if layer.is_object() {
            merge_into(&mut merged, layer);
        } else if !layer.is_null() {
            log::debug!("Skipping non-object option layer: {layer}");
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn later_layer_wins_and_keeps_disjoint_keys() {
        let merged = merge_layers([
            &json!({"a": 1, "b": 2}),
            &json!({"b": 3, "c": 4}),
        ]);
        assert_eq!(merged, json!({"a": 1, "b": 3, "c": 4}));
    }

    #[test]
    fn nested_objects_merge_instead_of_replacing() {
        let merged = merge_layers([
            &json!({"comment": {"enabled": false, "after": "\n<!-- /[#ID][.CLASS] -->"}}),
            &json!({"comment": {"enabled": true}}),
        ]);
        assert_eq!(
            merged,
            json!({"comment": {"enabled": true, "after": "\n<!-- /[#ID][.CLASS] -->"}})
        );
    }

    #[test]
    fn arrays_replace() {
        let merged = merge_layers([&json!({"list": [1, 2, 3]}), &json!({"list": [4]})]);
        assert_eq!(merged, json!({"list": [4]}));
    }

    #[test]
    fn null_and_scalar_layers_are_ignored() {
        let merged = merge_layers([&json!({"a": 1}), &Value::Null, &json!("oops"), &json!(42)]);
        assert_eq!(merged, json!({"a": 1}));
    }

    #[test]
    fn null_values_do_not_erase_existing_keys() {
        let mut base = json!({"a": 1});
        merge_into(&mut base, &json!({"a": null, "b": null}));
        assert_eq!(base, json!({"a": 1}));
    }
}
