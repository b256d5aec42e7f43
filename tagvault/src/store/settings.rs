use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

/// The configuration object kept in the enciphered config file.
///
/// Only `pw` has a meaning here; every other key is carried through load and save unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pw: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Settings {
    pub fn has_password(&self) -> bool {
        self.pw.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_settings_serialize_to_empty_object() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_unknown_keys_survive_roundtrip() {
        let parsed: Settings = serde_json::from_str(r#"{"pw": "p1", "theme": "dark"}"#).unwrap();
        assert_eq!(parsed.pw.as_deref(), Some("p1"));
        assert!(parsed.has_password());

        let value: serde_json::Value = serde_json::to_value(&parsed).unwrap();
        assert_eq!(value["pw"], "p1");
        assert_eq!(value["theme"], "dark");
    }
}
