use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

/// Payment processor credentials and defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProcessorConfig {
    /// Which secret key is used for calls
    #[serde(default)]
    pub mode: Mode,
    /// Secret key used in test mode
    #[serde(default)]
    pub test_secret: Option<SecretString>,
    /// Secret key used in live mode
    #[serde(default)]
    pub live_secret: Option<SecretString>,
    /// Three-letter currency code charges are made in
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Base URL of the processor REST API
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    /// Per-request timeout in seconds, unset for the HTTP client default
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// Which object `add_card` projects
    #[serde(default)]
    pub card_attach_result: CardAttachResult,
}

/// Processor mode selecting the active secret key
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Test key, no real money moves
    #[default]
    #[serde(alias = "Test")]
    Test,
    /// Live key
    #[serde(alias = "Live")]
    Live,
}

impl Mode {
    /// Lowercase mode name for messages and log fields
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Test => "test",
            Self::Live => "live",
        }
    }
}

/// Result shape of attaching a card to a customer
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CardAttachResult {
    /// Project the customer under the `customer` field map
    #[default]
    Customer,
    /// Project the created card under the `new_card` field map
    NewCard,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            test_secret: None,
            live_secret: None,
            currency: default_currency(),
            base_url: default_base_url(),
            request_timeout_secs: None,
            card_attach_result: CardAttachResult::default(),
        }
    }
}

impl ProcessorConfig {
    /// Secret key for the active mode
    ///
    /// Returns `None` when the key is unset or empty.
    pub fn secret_key(&self) -> Option<&SecretString> {
        let key = match self.mode {
            Mode::Test => self.test_secret.as_ref(),
            Mode::Live => self.live_secret.as_ref(),
        };

        key.filter(|key| !key.expose_secret().trim().is_empty())
    }

    /// Validate processor settings
    ///
    /// # Errors
    ///
    /// Returns an error if the currency is not a three-letter code or the
    /// base URL cannot be joined with relative paths
    pub fn validate(&self) -> Result<(), String> {
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_lowercase()) {
            return Err(format!(
                "processor.currency must be a three-letter lowercase code, got `{}`",
                self.currency
            ));
        }

        if !self.base_url.path().ends_with('/') {
            return Err(format!("processor.base_url must end with `/`, got `{}`", self.base_url));
        }

        if self.request_timeout_secs == Some(0) {
            return Err("processor.request_timeout_secs must be greater than 0".to_owned());
        }

        Ok(())
    }
}

fn default_currency() -> String {
    "usd".to_owned()
}

fn default_base_url() -> Url {
    Url::parse("https://api.stripe.com/v1/").expect("must be valid URL")
}
