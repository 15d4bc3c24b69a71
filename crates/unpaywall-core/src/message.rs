//! Runtime messages pushed to the page context
//!
//! The settings relay forwards store changes as
//! `{"action": "updateWhitelist", "whitelist": [...]}`. Unrecognised actions
//! decode as [`RuntimeMessage::Unknown`] and are ignored by the session.

use crate::error::Result;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Message received from the in-process broadcaster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum RuntimeMessage {
    /// Replace the cached whitelist
    #[serde(rename = "updateWhitelist")]
    UpdateWhitelist {
        /// New list; `None` when absent, null or malformed
        #[serde(default, deserialize_with = "lenient_domains")]
        whitelist: Option<Vec<String>>,
    },
    /// Any other action
    #[serde(other)]
    Unknown,
}

impl RuntimeMessage {
    /// Create a whitelist update message
    pub fn update_whitelist(whitelist: Option<Vec<String>>) -> Self {
        Self::UpdateWhitelist { whitelist }
    }

    /// Decode a message from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode the message as JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Accept only an array of strings; anything else reads as absent
fn lenient_domains<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_update() {
        let msg = RuntimeMessage::from_json(
            r#"{"action":"updateWhitelist","whitelist":["medium.com","example.org"]}"#,
        )
        .unwrap();

        assert_eq!(
            msg,
            RuntimeMessage::update_whitelist(Some(vec![
                "medium.com".to_string(),
                "example.org".to_string()
            ]))
        );
    }

    #[test]
    fn test_decode_null_and_missing() {
        let null = RuntimeMessage::from_json(r#"{"action":"updateWhitelist","whitelist":null}"#).unwrap();
        assert_eq!(null, RuntimeMessage::update_whitelist(None));

        let missing = RuntimeMessage::from_json(r#"{"action":"updateWhitelist"}"#).unwrap();
        assert_eq!(missing, RuntimeMessage::update_whitelist(None));
    }

    #[test]
    fn test_decode_malformed_list() {
        let msg = RuntimeMessage::from_json(r#"{"action":"updateWhitelist","whitelist":[1,2]}"#).unwrap();
        assert_eq!(msg, RuntimeMessage::update_whitelist(None));

        let msg = RuntimeMessage::from_json(r#"{"action":"updateWhitelist","whitelist":"medium.com"}"#).unwrap();
        assert_eq!(msg, RuntimeMessage::update_whitelist(None));
    }

    #[test]
    fn test_unknown_action() {
        let msg = RuntimeMessage::from_json(r#"{"action":"ping"}"#).unwrap();
        assert_eq!(msg, RuntimeMessage::Unknown);
    }

    #[test]
    fn test_missing_action_is_error() {
        assert!(RuntimeMessage::from_json(r#"{"whitelist":[]}"#).is_err());
    }

    #[test]
    fn test_encode() {
        let json = RuntimeMessage::update_whitelist(Some(vec!["medium.com".to_string()]))
            .to_json()
            .unwrap();
        assert_eq!(json, r#"{"action":"updateWhitelist","whitelist":["medium.com"]}"#);
    }
}
