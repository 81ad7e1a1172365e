//! Consumer credentials for WooCommerce API authentication.

use secrecy::{ExposeSecret, SecretString};

/// Default environment variable holding the consumer key.
pub const CONSUMER_KEY_VAR: &str = "WOOCOMMERCE_CONSUMER_KEY";
/// Default environment variable holding the consumer secret.
pub const CONSUMER_SECRET_VAR: &str = "WOOCOMMERCE_CONSUMER_SECRET";

/// API credentials containing the consumer key and secret.
#[derive(Clone)]
pub struct Credentials {
    /// The consumer key (public identifier, `ck_...`)
    pub consumer_key: String,
    /// The consumer secret (private, `cs_...`)
    consumer_secret: SecretString,
}

impl Credentials {
    /// Create new credentials from a consumer key and secret.
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: SecretString::from(consumer_secret.into()),
        }
    }

    /// Get the consumer secret for signing.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_secret(&self) -> &str {
        self.consumer_secret.expose_secret()
    }

    /// Try to read credentials from `WOOCOMMERCE_CONSUMER_KEY` and
    /// `WOOCOMMERCE_CONSUMER_SECRET`.
    ///
    /// Returns `None` if either variable is not set.
    pub fn try_from_env() -> Option<Self> {
        Self::try_from_env_vars(CONSUMER_KEY_VAR, CONSUMER_SECRET_VAR)
    }

    /// Try to read credentials from custom environment variable names.
    pub fn try_from_env_vars(key_var: &str, secret_var: &str) -> Option<Self> {
        let consumer_key = std::env::var(key_var).ok()?;
        let consumer_secret = std::env::var(secret_var).ok()?;

        Some(Self::new(consumer_key, consumer_secret))
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacted() {
        let creds = Credentials::new("ck_key", "cs_super_secret");
        let debug_str = format!("{:?}", creds);
        assert!(debug_str.contains("ck_key"));
        assert!(!debug_str.contains("cs_super_secret"));
        assert!(debug_str.contains("[REDACTED]"));
    }

    #[test]
    fn test_missing_env_vars() {
        let creds = Credentials::try_from_env_vars(
            "WOOCOMMERCE_TEST_UNSET_KEY_VAR",
            "WOOCOMMERCE_TEST_UNSET_SECRET_VAR",
        );
        assert!(creds.is_none());
    }
}
