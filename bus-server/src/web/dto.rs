//! Request types for the web layer.

use serde::Deserialize;

/// Query string of the webhook verification handshake.
#[derive(Debug, Default, Deserialize)]
pub struct VerifyParams {
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,

    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,

    /// Echoed back when verification succeeds
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

impl VerifyParams {
    /// The challenge to echo, if this is a subscribe request carrying `expected_token`.
    ///
    /// An empty `expected_token` means none is configured, and nothing verifies.
    pub fn accepted_challenge(&self, expected_token: &str) -> Option<&str> {
        if expected_token.is_empty() {
            return None;
        }

        let subscribing = self.mode.as_deref() == Some("subscribe");
        let token_matches = self.verify_token.as_deref() == Some(expected_token);

        if subscribing && token_matches {
            Some(self.challenge.as_deref().unwrap_or_default())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(mode: &str, token: &str, challenge: &str) -> VerifyParams {
        VerifyParams {
            mode: Some(mode.to_string()),
            verify_token: Some(token.to_string()),
            challenge: Some(challenge.to_string()),
        }
    }

    #[test]
    fn accepts_matching_subscribe() {
        assert_eq!(
            params("subscribe", "secret", "1158201444").accepted_challenge("secret"),
            Some("1158201444")
        );
    }

    #[test]
    fn rejects_wrong_token_or_mode() {
        assert_eq!(params("subscribe", "guess", "1").accepted_challenge("secret"), None);
        assert_eq!(params("unsubscribe", "secret", "1").accepted_challenge("secret"), None);
        assert_eq!(VerifyParams::default().accepted_challenge("secret"), None);
    }

    #[test]
    fn unconfigured_token_never_verifies() {
        let config = crate::config::AppConfig::from_lookup(|_| None).unwrap();

        assert_eq!(params("subscribe", "", "1158201444").accepted_challenge(&config.verify_token), None);
        assert_eq!(
            VerifyParams {
                mode: Some("subscribe".to_string()),
                verify_token: None,
                challenge: Some("1".to_string()),
            }
            .accepted_challenge(""),
            None
        );
    }

    #[test]
    fn deserializes_dotted_names() {
        let params: VerifyParams = serde_json::from_str(
            r#"{"hub.mode": "subscribe", "hub.verify_token": "t", "hub.challenge": "c"}"#,
        )
        .unwrap();

        assert_eq!(params.mode.as_deref(), Some("subscribe"));
        assert_eq!(params.verify_token.as_deref(), Some("t"));
        assert_eq!(params.challenge.as_deref(), Some("c"));
    }
}
