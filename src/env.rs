//! Environment-variable sources and the layered merge
//!
//! Callers hand the reconciler an ordered list of sources (TLS settings,
//! datastore settings, ...). The reconciler only depends on the
//! [`EnvVarSource`] capability, never on concrete source types.

use std::collections::{BTreeMap, HashMap};

/// Anything that can flatten itself into environment variables
pub trait EnvVarSource {
    fn to_env_vars(&self) -> HashMap<String, String>;
}

impl EnvVarSource for HashMap<String, String> {
    fn to_env_vars(&self) -> HashMap<String, String> {
        self.clone()
    }
}

impl EnvVarSource for BTreeMap<String, String> {
    fn to_env_vars(&self) -> HashMap<String, String> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

/// Merge `sources` over `defaults` into one environment.
///
/// Earlier sources win on key collision; `defaults` only fill keys no source
/// provides. Callers pass their highest-priority sources first, so this is
/// first-source-wins chained-mapping semantics, not last-write-wins.
pub fn merge_env(
    defaults: &BTreeMap<String, String>,
    sources: &[&dyn EnvVarSource],
) -> BTreeMap<String, String> {
    let mut merged = BTreeMap::new();
    for source in sources {
        for (key, value) in source.to_env_vars() {
            merged.entry(key).or_insert(value);
        }
    }
    for (key, value) in defaults {
        merged
            .entry(key.clone())
            .or_insert_with(|| value.clone());
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn defaults() -> BTreeMap<String, String> {
        [("A", "default"), ("B", "default")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn earliest_source_wins_on_collision() {
        let first = source(&[("FOO", "bar")]);
        let second = source(&[("FOO", "baz"), ("QUX", "1")]);
        let merged = merge_env(&defaults(), &[&first, &second]);
        assert_eq!(merged["FOO"], "bar");
        assert_eq!(merged["QUX"], "1");
    }

    #[test]
    fn sources_override_defaults() {
        let tls = source(&[("A", "from-source")]);
        let merged = merge_env(&defaults(), &[&tls]);
        assert_eq!(merged["A"], "from-source");
        assert_eq!(merged["B"], "default");
    }

    #[test]
    fn no_sources_yields_defaults() {
        let merged = merge_env(&defaults(), &[]);
        assert_eq!(merged, defaults());
    }

    #[test]
    fn non_colliding_keys_union() {
        let first = source(&[("X", "1")]);
        let second = source(&[("Y", "2")]);
        let merged = merge_env(&BTreeMap::new(), &[&first, &second]);
        assert_eq!(merged["X"], "1");
        assert_eq!(merged["Y"], "2");
        assert_eq!(merged.len(), 2);
    }
}
