//! `deserialize_with` helpers that trim surrounding whitespace while decoding,
//! so payload validation sees the value that will be stored.

use serde::{Deserialize, Deserializer};

pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|value| value.trim().to_string())
}

/// Pair with `#[serde(default)]` so a missing field stays `None`.
pub fn option<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|value| value.map(|v| v.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        #[serde(deserialize_with = "super::string")]
        name: String,
        #[serde(default, deserialize_with = "super::option")]
        note: Option<String>,
    }

    #[test]
    fn trims_present_values_and_keeps_missing_ones_empty() {
        let payload: Payload = serde_json::from_str(r#"{"name": "  Tools \n"}"#).unwrap();
        assert_eq!(payload.name, "Tools");
        assert_eq!(payload.note, None);

        let payload: Payload =
            serde_json::from_str(r#"{"name": "   ", "note": " x "}"#).unwrap();
        assert_eq!(payload.name, "");
        assert_eq!(payload.note.as_deref(), Some("x"));
    }

    #[test]
    fn explicit_null_is_none() {
        let payload: Payload = serde_json::from_str(r#"{"name": "a", "note": null}"#).unwrap();
        assert_eq!(payload.note, None);
    }
}
