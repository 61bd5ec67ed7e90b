//! Application configuration
//!
//! Only the settings table processors consult are typed; everything else is
//! kept verbatim in [`StreamsConfig::other`].

use crate::error::{StreamsError, StreamsResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Property name of the rolling-upgrade origin marker
pub const UPGRADE_FROM_CONFIG: &str = "upgrade.from";

/// Stream application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamsConfig {
    /// Release the application is being upgraded from, if any
    #[serde(
        rename = "upgrade.from",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub upgrade_from: Option<String>,

    /// Remaining properties
    #[serde(flatten)]
    pub other: BTreeMap<String, serde_json::Value>,
}

impl StreamsConfig {
    /// Create empty configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With upgrade-from marker
    #[inline]
    #[must_use]
    pub fn with_upgrade_from(mut self, marker: impl Into<String>) -> Self {
        self.upgrade_from = Some(marker.into());
        self
    }

    /// Parse TOML text
    ///
    /// The marker may be written as a quoted key (`"upgrade.from" = "2.3"`),
    /// a dotted key (`upgrade.from = "2.3"`) or an `[upgrade]` table.
    ///
    /// # Errors
    /// Returns [`StreamsError::Config`] if the text is not valid TOML, a
    /// typed property has the wrong type, or the marker is given twice
    pub fn from_toml_str(text: &str) -> StreamsResult<Self> {
        let mut config: Self =
            toml::from_str(text).map_err(|e| StreamsError::Config(e.to_string()))?;
        config.lift_nested_upgrade_from()?;
        Ok(config)
    }

    // Dotted keys deserialize as `upgrade = { from = .. }` in the open map.
    fn lift_nested_upgrade_from(&mut self) -> StreamsResult<()> {
        let Some(serde_json::Value::Object(upgrade)) = self.other.get_mut("upgrade") else {
            return Ok(());
        };
        let Some(from) = upgrade.remove("from") else {
            return Ok(());
        };
        if upgrade.is_empty() {
            self.other.remove("upgrade");
        }

        let marker = match from {
            serde_json::Value::String(marker) => marker,
            other => {
                return Err(StreamsError::Config(format!(
                    "{UPGRADE_FROM_CONFIG} must be a string, got {other}"
                )))
            }
        };
        if self.upgrade_from.is_some() {
            return Err(StreamsError::Config(format!(
                "{UPGRADE_FROM_CONFIG} is set more than once"
            )));
        }
        self.upgrade_from = Some(marker);
        Ok(())
    }

    /// Build from string property pairs
    #[must_use]
    pub fn from_props<I, K, V>(props: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::new();
        for (key, value) in props {
            let (key, value) = (key.as_ref().trim(), value.as_ref().trim());
            if key == UPGRADE_FROM_CONFIG {
                config.upgrade_from = Some(value.to_string());
            } else {
                config
                    .other
                    .insert(key.to_string(), serde_json::Value::String(value.to_string()));
            }
        }
        config
    }

    /// Parse `key=value` properties text
    ///
    /// Blank lines and lines starting with `#` or `!` are skipped.
    ///
    /// # Errors
    /// Returns [`StreamsError::Config`] for a line without `=`
    pub fn from_properties_str(text: &str) -> StreamsResult<Self> {
        let mut pairs = Vec::new();
        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            let (key, value) = line.split_once('=').ok_or_else(|| {
                StreamsError::Config(format!("line {}: expected key=value", index + 1))
            })?;
            pairs.push((key, value));
        }
        Ok(Self::from_props(pairs))
    }

    /// Raw upgrade-from marker
    #[inline]
    #[must_use]
    pub fn upgrade_from(&self) -> Option<&str> {
        self.upgrade_from.as_deref()
    }

    /// Any other property
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.other.get(key)
    }
}

/// Recognized upgrade-from markers, one per release line
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum UpgradeFrom {
    V0_10_0,
    V0_10_1,
    V0_10_2,
    V0_11_0,
    V1_0,
    V1_1,
    V2_0,
    V2_1,
    V2_2,
    V2_3,
    V2_4,
    V2_5,
    V2_6,
    V2_7,
    V2_8,
    V3_0,
    V3_1,
    V3_2,
    V3_3,
    V3_4,
    V3_5,
    V3_6,
    V3_7,
    V3_8,
    V3_9,
}

impl UpgradeFrom {
    /// Every recognized marker, oldest first
    pub const ALL: [Self; 25] = [
        Self::V0_10_0,
        Self::V0_10_1,
        Self::V0_10_2,
        Self::V0_11_0,
        Self::V1_0,
        Self::V1_1,
        Self::V2_0,
        Self::V2_1,
        Self::V2_2,
        Self::V2_3,
        Self::V2_4,
        Self::V2_5,
        Self::V2_6,
        Self::V2_7,
        Self::V2_8,
        Self::V3_0,
        Self::V3_1,
        Self::V3_2,
        Self::V3_3,
        Self::V3_4,
        Self::V3_5,
        Self::V3_6,
        Self::V3_7,
        Self::V3_8,
        Self::V3_9,
    ];

    /// Configuration value for this marker
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::V0_10_0 => "0.10.0",
            Self::V0_10_1 => "0.10.1",
            Self::V0_10_2 => "0.10.2",
            Self::V0_11_0 => "0.11.0",
            Self::V1_0 => "1.0",
            Self::V1_1 => "1.1",
            Self::V2_0 => "2.0",
            Self::V2_1 => "2.1",
            Self::V2_2 => "2.2",
            Self::V2_3 => "2.3",
            Self::V2_4 => "2.4",
            Self::V2_5 => "2.5",
            Self::V2_6 => "2.6",
            Self::V2_7 => "2.7",
            Self::V2_8 => "2.8",
            Self::V3_0 => "3.0",
            Self::V3_1 => "3.1",
            Self::V3_2 => "3.2",
            Self::V3_3 => "3.3",
            Self::V3_4 => "3.4",
            Self::V3_5 => "3.5",
            Self::V3_6 => "3.6",
            Self::V3_7 => "3.7",
            Self::V3_8 => "3.8",
            Self::V3_9 => "3.9",
        }
    }

    /// Release forwards same-key regroupings as a remove followed by an add
    ///
    /// True for every release up to and including 3.4.
    #[inline]
    #[must_use]
    pub fn is_pre_merge(self) -> bool {
        self <= Self::V3_4
    }
}

impl fmt::Display for UpgradeFrom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UpgradeFrom {
    type Err = StreamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| StreamsError::Config(format!("unrecognized upgrade.from value: '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_has_no_marker() {
        assert_eq!(StreamsConfig::new().upgrade_from(), None);
    }

    #[test]
    fn from_toml_reads_marker_and_other_properties() {
        let config = StreamsConfig::from_toml_str(
            r#"
            "upgrade.from" = "2.3"
            "application.id" = "wordcount"
            "num.stream.threads" = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.upgrade_from(), Some("2.3"));
        assert_eq!(
            config.get("application.id"),
            Some(&serde_json::Value::String("wordcount".to_string()))
        );
        assert_eq!(config.get("num.stream.threads"), Some(&serde_json::json!(4)));
    }

    #[test]
    fn from_toml_reads_dotted_marker() {
        let config = StreamsConfig::from_toml_str(r#"upgrade.from = "2.3""#).unwrap();

        assert_eq!(config.upgrade_from(), Some("2.3"));
        assert_eq!(config.get("upgrade"), None);
    }

    #[test]
    fn from_toml_reads_marker_from_table() {
        let config = StreamsConfig::from_toml_str(
            r#"
            [upgrade]
            from = "0.11.0"
            mode = "rolling"
            "#,
        )
        .unwrap();

        assert_eq!(config.upgrade_from(), Some("0.11.0"));
        assert_eq!(
            config.get("upgrade"),
            Some(&serde_json::json!({ "mode": "rolling" }))
        );
    }

    #[test]
    fn from_toml_rejects_non_string_dotted_marker() {
        let err = StreamsConfig::from_toml_str("upgrade.from = 23").unwrap_err();
        assert!(matches!(err, StreamsError::Config(_)));
    }

    #[test]
    fn from_toml_rejects_duplicate_marker() {
        let err = StreamsConfig::from_toml_str(
            "\"upgrade.from\" = \"2.3\"\nupgrade.from = \"3.4\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, StreamsError::Config(_)));
    }

    #[test]
    fn from_toml_rejects_non_string_marker() {
        let err = StreamsConfig::from_toml_str(r#""upgrade.from" = 23"#).unwrap_err();
        assert!(matches!(err, StreamsError::Config(_)));
    }

    #[test]
    fn from_properties_text() {
        let config = StreamsConfig::from_properties_str(
            "# rolling bounce\nupgrade.from = 3.4\n\napplication.id=agg\n",
        )
        .unwrap();

        assert_eq!(config.upgrade_from(), Some("3.4"));
        assert_eq!(
            config.get("application.id"),
            Some(&serde_json::Value::String("agg".to_string()))
        );
    }

    #[test]
    fn from_properties_rejects_bare_line() {
        let err = StreamsConfig::from_properties_str("upgrade.from").unwrap_err();
        assert_eq!(
            err,
            StreamsError::Config("line 1: expected key=value".to_string())
        );
    }

    #[test]
    fn upgrade_from_parse_roundtrips_names() {
        for marker in UpgradeFrom::ALL {
            assert_eq!(marker.as_str().parse::<UpgradeFrom>().unwrap(), marker);
        }
        assert!("4.0".parse::<UpgradeFrom>().is_err());
        assert!("".parse::<UpgradeFrom>().is_err());
    }

    #[test]
    fn pre_merge_range() {
        assert!(UpgradeFrom::V0_10_0.is_pre_merge());
        assert!(UpgradeFrom::V2_8.is_pre_merge());
        assert!(UpgradeFrom::V3_4.is_pre_merge());
        assert!(!UpgradeFrom::V3_5.is_pre_merge());
        assert!(!UpgradeFrom::V3_9.is_pre_merge());

        let legacy = UpgradeFrom::ALL.iter().filter(|m| m.is_pre_merge()).count();
        assert_eq!(legacy, 20);
    }
}
