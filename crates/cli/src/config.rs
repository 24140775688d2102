use std::path::PathBuf;

use anyhow::Context;

/// Default snapshot location, relative to the working directory.
pub const DEFAULT_SNAPSHOT: &str = "leadbook.json";

/// Default fraction digits for amounts printed by reports.
pub const DEFAULT_FRACTION_DIGITS: usize = 2;

/// CLI configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    /// JSON snapshot the in-memory store is seeded from.
    pub snapshot_path: PathBuf,
    /// Fraction digits for formatted amounts.
    pub fraction_digits: usize,
}

impl CliConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default         |
    /// |----------------------------|-----------------|
    /// | `LEADBOOK_SNAPSHOT`        | `leadbook.json` |
    /// | `LEADBOOK_FRACTION_DIGITS` | `2`             |
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let snapshot_path = lookup("LEADBOOK_SNAPSHOT")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SNAPSHOT.into())
            .into();

        let fraction_digits = match lookup("LEADBOOK_FRACTION_DIGITS") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("LEADBOOK_FRACTION_DIGITS must be a number, got {raw:?}"))?,
            None => DEFAULT_FRACTION_DIGITS,
        };

        Ok(Self {
            snapshot_path,
            fraction_digits,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = CliConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.snapshot_path, PathBuf::from(DEFAULT_SNAPSHOT));
        assert_eq!(config.fraction_digits, DEFAULT_FRACTION_DIGITS);
    }

    #[test]
    fn env_values_override_defaults() {
        let config = CliConfig::from_lookup(lookup(&[
            ("LEADBOOK_SNAPSHOT", "/tmp/crm.json"),
            ("LEADBOOK_FRACTION_DIGITS", "3"),
        ]))
        .unwrap();
        assert_eq!(config.snapshot_path, PathBuf::from("/tmp/crm.json"));
        assert_eq!(config.fraction_digits, 3);
    }

    #[test]
    fn bad_fraction_digits_is_an_error() {
        let err = CliConfig::from_lookup(lookup(&[("LEADBOOK_FRACTION_DIGITS", "two")])).unwrap_err();
        assert!(err.to_string().contains("LEADBOOK_FRACTION_DIGITS"));
    }
}
