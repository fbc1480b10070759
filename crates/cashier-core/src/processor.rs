use async_trait::async_trait;
use secrecy::SecretString;
use serde::Serialize;

use crate::error::ProcessorError;

/// Response object returned by a successful processor call
///
/// Processors return deeply nested objects (a charge embeds its card, a
/// customer embeds its card list). The facade only assumes that objects
/// have named attributes which may themselves be objects.
pub type RawResponse = serde_json::Value;

/// Result of a processor call
pub type Result<T> = std::result::Result<T, ProcessorError>;

/// Parameters for creating a charge
///
/// At least one of `card` or `customer` is set; when both are set the
/// charge is made against that card on the customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCharge {
    /// Amount in minor currency units (e.g. cents)
    pub amount: i64,
    /// Three-letter lowercase currency code
    pub currency: String,
    /// Free-form description shown on the processor dashboard
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Single-use card token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<String>,
    /// Saved customer to charge
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
}

/// Parameters for creating a customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCustomer {
    /// Customer email address
    pub email: String,
    /// Card token to attach as the customer's default card
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<String>,
}

/// Capability exposed by a payment-processor client
///
/// Every call receives the secret key resolved for the active mode, so a
/// single client can serve both test and live traffic. Implementations own
/// transport concerns (TLS, timeouts, connection reuse) and must be safe to
/// share across tasks.
#[async_trait]
pub trait Processor: Send + Sync {
    /// Create a charge
    async fn create_charge(&self, key: &SecretString, charge: &NewCharge) -> Result<RawResponse>;

    /// Create a customer
    async fn create_customer(&self, key: &SecretString, customer: &NewCustomer) -> Result<RawResponse>;

    /// Fetch a customer by id
    async fn retrieve_customer(&self, key: &SecretString, customer_id: &str) -> Result<RawResponse>;

    /// Attach a tokenized card to a customer, returning the new card object
    async fn attach_card(&self, key: &SecretString, customer_id: &str, card_token: &str) -> Result<RawResponse>;

    /// List the cards saved on a customer, in processor order
    async fn list_cards(&self, key: &SecretString, customer_id: &str) -> Result<Vec<RawResponse>>;

    /// Fetch a charge by id
    async fn retrieve_charge(&self, key: &SecretString, charge_id: &str) -> Result<RawResponse>;

    /// Refund a charge in full, returning the updated charge object
    async fn refund_charge(&self, key: &SecretString, charge_id: &str) -> Result<RawResponse>;

    /// Processor name used in log fields
    fn name(&self) -> &str;
}
