//! Tags - Key-value tag sets, ignore rules, and update diffing

use std::collections::BTreeMap;

use crate::resource::Value;

/// Key prefix AWS reserves for internal tags
pub const AWS_TAG_KEY_PREFIX: &str = "aws:";

/// Unordered key-value tag set
///
/// Backed by a BTreeMap so iteration order is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyValueTags(BTreeMap<String, String>);

impl KeyValueTags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a `Value::Map` attribute; non-string values are skipped
    pub fn from_value(value: Option<&Value>) -> Self {
        let mut tags = BTreeMap::new();
        if let Some(Value::Map(map)) = value {
            for (key, value) in map {
                if let Value::String(v) = value {
                    tags.insert(key.clone(), v.clone());
                }
            }
        }
        Self(tags)
    }

    /// Convert to a `Value::Map` attribute
    pub fn to_value(&self) -> Value {
        Value::Map(
            self.0
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect(),
        )
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Drop AWS-internal tags (keys with the "aws:" prefix)
    pub fn ignore_aws(self) -> Self {
        Self(
            self.0
                .into_iter()
                .filter(|(k, _)| !k.starts_with(AWS_TAG_KEY_PREFIX))
                .collect(),
        )
    }

    /// Drop tags matched by the provider's ignore rules
    pub fn ignore_config(self, config: &IgnoreTagsConfig) -> Self {
        Self(
            self.0
                .into_iter()
                .filter(|(k, _)| {
                    !config.keys.iter().any(|ignored| ignored == k)
                        && !config.key_prefixes.iter().any(|p| k.starts_with(p.as_str()))
                })
                .collect(),
        )
    }
}

impl FromIterator<(String, String)> for KeyValueTags {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Provider-level tag ignore rules
#[derive(Debug, Clone, Default)]
pub struct IgnoreTagsConfig {
    /// Exact keys to ignore
    pub keys: Vec<String>,
    /// Key prefixes to ignore
    pub key_prefixes: Vec<String>,
}

/// Delta between an old and a new tag set
///
/// `create` holds added keys and keys whose value changed; `remove` holds
/// keys present in the old set but absent from the new one. Unchanged
/// pairs appear in neither.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagDiff {
    pub create: KeyValueTags,
    pub remove: Vec<String>,
}

impl TagDiff {
    pub fn between(old: &KeyValueTags, new: &KeyValueTags) -> Self {
        let create = new
            .iter()
            .filter(|&(key, value)| old.get(key) != Some(value))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let remove = old
            .keys()
            .filter(|&key| !new.contains_key(key))
            .map(str::to_string)
            .collect();

        Self { create, remove }
    }

    pub fn is_empty(&self) -> bool {
        self.create.is_empty() && self.remove.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn tags(pairs: &[(&str, &str)]) -> KeyValueTags {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn diff_only_added_changed_removed() {
        let old = tags(&[("Name", "a"), ("Env", "dev"), ("Team", "net")]);
        let new = tags(&[("Name", "a"), ("Env", "prod"), ("Owner", "ops")]);

        let diff = TagDiff::between(&old, &new);

        // "Name" is unchanged and must appear in neither half
        assert_eq!(diff.create, tags(&[("Env", "prod"), ("Owner", "ops")]));
        assert_eq!(diff.remove, vec!["Team".to_string()]);
    }

    #[test]
    fn diff_of_identical_sets_is_empty() {
        let set = tags(&[("Name", "a")]);
        assert!(TagDiff::between(&set, &set).is_empty());
    }

    #[test]
    fn diff_against_empty_old_creates_everything() {
        let new = tags(&[("Name", "a"), ("Env", "dev")]);
        let diff = TagDiff::between(&KeyValueTags::new(), &new);
        assert_eq!(diff.create, new);
        assert!(diff.remove.is_empty());
    }

    #[test]
    fn ignore_aws_drops_internal_keys() {
        let filtered = tags(&[
            ("Name", "a"),
            ("aws:cloudformation:stack-name", "s"),
            ("aws:createdBy", "x"),
        ])
        .ignore_aws();

        assert_eq!(filtered, tags(&[("Name", "a")]));
    }

    #[test]
    fn ignore_config_drops_keys_and_prefixes() {
        let config = IgnoreTagsConfig {
            keys: vec!["Owner".to_string()],
            key_prefixes: vec!["kubernetes.io/".to_string()],
        };

        let filtered = tags(&[
            ("Name", "a"),
            ("Owner", "ops"),
            ("kubernetes.io/cluster/main", "owned"),
        ])
        .ignore_config(&config);

        assert_eq!(filtered, tags(&[("Name", "a")]));
    }

    #[test]
    fn from_value_skips_non_string_values() {
        let mut map = HashMap::new();
        map.insert("Name".to_string(), Value::String("a".to_string()));
        map.insert("Count".to_string(), Value::Int(3));

        let tags = KeyValueTags::from_value(Some(&Value::Map(map)));
        assert_eq!(tags.len(), 1);
        assert_eq!(tags.get("Name"), Some("a"));
    }

    #[test]
    fn from_missing_value_is_empty() {
        assert!(KeyValueTags::from_value(None).is_empty());
    }

    #[test]
    fn round_trips_through_value_map() {
        let original = tags(&[("Name", "a"), ("Env", "dev")]);
        let value = original.to_value();
        assert_eq!(KeyValueTags::from_value(Some(&value)), original);
    }
}
