//! Programmatic configuration builder for integration tests

use std::sync::Arc;

use cashier_config::{CardAttachResult, Config, FieldMap, OperationKind, ResultSpec, SourcePath};
use cashier_payments::PaymentOperations;
use cashier_stripe::StripeClient;
use secrecy::SecretString;
use url::Url;

/// Secret key the mock processor expects
pub const TEST_SECRET: &str = "sk_test_integration";

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Test mode with [`TEST_SECRET`] and the processor at `base_url`
    pub fn new(base_url: &str) -> Self {
        let mut config = Config::default();
        config.processor.test_secret = Some(SecretString::from(TEST_SECRET.to_owned()));
        config.processor.base_url = Url::parse(base_url).unwrap();

        Self { config }
    }

    /// Field maps matching the classic charge and refund records
    pub fn with_default_fields(mut self) -> Self {
        let fields: FieldMap = [
            (
                OperationKind::Charge,
                ResultSpec::from_iter([
                    ("stripe_id", SourcePath::attribute("id")),
                    ("stripe_last4", SourcePath::nested("card", "last4")),
                    ("stripe_address_zip_check", SourcePath::nested("card", "address_zip_check")),
                    ("stripe_cvc_check", SourcePath::nested("card", "cvc_check")),
                    ("stripe_amount", SourcePath::attribute("amount")),
                    ("stripe_customer", SourcePath::attribute("customer")),
                ]),
            ),
            (
                OperationKind::Refund,
                ResultSpec::from_iter([
                    ("stripe_id", SourcePath::attribute("id")),
                    ("stripe_last4", SourcePath::nested("card", "last4")),
                    ("stripe_card-type", SourcePath::nested("card", "type")),
                    ("stripe_amount", SourcePath::attribute("amount_refunded")),
                    ("stripe_customer", SourcePath::attribute("customer")),
                ]),
            ),
        ]
        .into_iter()
        .collect();

        self.config.fields = fields;
        self
    }

    /// Register a field map for one operation kind
    pub fn with_fields(mut self, kind: OperationKind, spec: ResultSpec) -> Self {
        self.config.fields.insert(kind, spec);
        self
    }

    /// Project the new card from `add_card`
    pub fn with_new_card_result(mut self) -> Self {
        self.config.processor.card_attach_result = CardAttachResult::NewCard;
        self
    }

    /// Drop the test secret
    pub fn without_secret(mut self) -> Self {
        self.config.processor.test_secret = None;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }

    /// Build payment operations backed by a real Stripe client
    pub fn operations(self) -> PaymentOperations {
        let config = self.build();
        let client = StripeClient::from_config(&config.processor).unwrap();
        PaymentOperations::from_config(Arc::new(client), &config)
    }
}
