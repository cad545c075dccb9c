use regex::Regex;
use std::fmt;

/// Scrubs credentials from messages before they are printed or logged.
///
/// Used on error chains, which can carry request bodies and response text
/// from Jira and Google.
#[derive(Clone)]
pub struct SecretScrubbingLayer {
    private_key_pattern: Regex,
    bearer_pattern: Regex,
    basic_pattern: Regex,
    token_pattern: Regex,
    password_pattern: Regex,
}

impl SecretScrubbingLayer {
    /// Create a new secret scrubbing layer
    pub fn new() -> Self {
        Self {
            // PEM private keys, including JSON-escaped newlines
            private_key_pattern: Regex::new(
                r"-----BEGIN [A-Z ]*PRIVATE KEY-----[\s\S]*?-----END [A-Z ]*PRIVATE KEY-----",
            )
            .expect("static regex"),
            bearer_pattern: Regex::new(r"Bearer\s+[a-zA-Z0-9\-_\.~+/]+=*").expect("static regex"),
            basic_pattern: Regex::new(r"Basic\s+[a-zA-Z0-9+/]{8,}=*").expect("static regex"),
            // access_token, id_token, assertion, api_key and friends
            token_pattern: Regex::new(
                r#"["']?(access_token|id_token|refresh_token|assertion|api_key|apikey|secret)["']?\s*[:=]\s*["']?[a-zA-Z0-9\-_\.~+/]{8,}=*["']?"#,
            )
            .expect("static regex"),
            password_pattern: Regex::new(r#"["']?password["']?\s*[:=]\s*["']?([^"'\s,}]+)["']?"#)
                .expect("static regex"),
        }
    }

    /// Scrub a message of sensitive data
    pub fn scrub_message(&self, message: &str) -> String {
        let scrubbed = self
            .private_key_pattern
            .replace_all(message, "[PRIVATE_KEY_REDACTED]");
        let scrubbed = self
            .bearer_pattern
            .replace_all(&scrubbed, "Bearer [TOKEN_REDACTED]");
        let scrubbed = self
            .basic_pattern
            .replace_all(&scrubbed, "Basic [CREDENTIALS_REDACTED]");
        let scrubbed = self
            .token_pattern
            .replace_all(&scrubbed, "$1=[REDACTED]");
        self.password_pattern
            .replace_all(&scrubbed, "password=[REDACTED]")
            .into_owned()
    }
}

impl Default for SecretScrubbingLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SecretScrubbingLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretScrubbingLayer").finish()
    }
}
