use std::collections::BTreeMap;

use crate::data::RequestOptions;

/// Shallow-merge `patch` into `base`.
///
/// Entries of `patch` replace entries of `base` with the same key; a
/// `null` entry removes the key instead. Nested objects are replaced as a
/// whole, not merged.
pub fn merge_options(base: &RequestOptions, patch: &RequestOptions) -> RequestOptions {
    let mut merged = base.clone();
    for (key, value) in patch.iter() {
        if value.is_null() {
            merged.remove(key);
        } else {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

/// Shallow-merge `patch` into `base`; a `None` entry removes the key.
pub fn merge_entries<K, V, I>(base: &BTreeMap<K, V>, patch: I) -> BTreeMap<K, V>
where
    K: Ord + Clone,
    V: Clone,
    I: IntoIterator<Item = (K, Option<V>)>,
{
    let mut merged = base.clone();
    for (key, value) in patch {
        match value {
            Some(value) => {
                merged.insert(key, value);
            }
            None => {
                merged.remove(&key);
            }
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_options_keeps_unnamed_entries() {
        let base = RequestOptions::new()
            .with_method("GET")
            .with_credentials("include");
        let patch = RequestOptions::new().with_method("POST");

        let merged = merge_options(&base, &patch);

        assert_eq!(merged.method(), Some("POST"));
        assert_eq!(merged.get("credentials"), Some(&json!("include")));
        assert_eq!(base.method(), Some("GET"));
    }

    #[test]
    fn test_merge_options_null_removes() {
        let base = RequestOptions::new()
            .with_method("GET")
            .with_credentials("include");
        let patch = RequestOptions::new().cleared("credentials");

        let merged = merge_options(&base, &patch);

        assert!(!merged.contains("credentials"));
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn test_merge_options_is_shallow() {
        let base = RequestOptions::new()
            .with_header("Accept", "*/*")
            .with_header("X-Trace", "1");
        let patch = RequestOptions::new().with_header("Accept", "text/html");

        let merged = merge_options(&base, &patch);

        assert_eq!(merged.header("Accept"), Some("text/html"));
        assert_eq!(merged.header("X-Trace"), None);
    }

    #[test]
    fn test_merge_entries() {
        let base = BTreeMap::from([(200, "ok"), (404, "missing")]);

        let merged = merge_entries(&base, [(404, None), (500, Some("boom"))]);

        assert_eq!(merged, BTreeMap::from([(200, "ok"), (500, "boom")]));
        assert_eq!(base.len(), 2);
    }

    #[test]
    fn test_merge_entries_remove_absent_is_noop() {
        let base = BTreeMap::from([(200, "ok")]);

        let merged = merge_entries(&base, [(418, None)]);

        assert_eq!(merged, base);
    }
}
