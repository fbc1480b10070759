//! Payment use cases over a [`Processor`]

use std::fmt;
use std::sync::Arc;

use cashier_config::{CardAttachResult, Config, FieldMap, OperationKind, ProcessorConfig};
use cashier_core::{Processor, RawResponse};
use secrecy::SecretString;
use tracing::info;

use crate::cards::{CardRecord, project_cards};
use crate::classify::{LOG_TARGET, classify};
use crate::error::{PaymentError, Result};
use crate::mapper::{FieldMapper, ProjectedResult};
use crate::outcome::PaymentOutcome;
use crate::request::{AddCardRequest, ChargeRequest, CreateCustomerRequest, RefundRequest, required};

/// Payment operations facade
///
/// Every operation resolves the secret key for the active mode, validates
/// its input, calls the processor, and then either projects the response
/// through the field map or classifies the failure. Configuration and
/// validation faults are returned as `Err`; processor failures are returned
/// as [`PaymentOutcome::Failed`].
#[derive(Clone)]
pub struct PaymentOperations {
    processor: Arc<dyn Processor>,
    settings: Arc<ProcessorConfig>,
    mapper: FieldMapper,
}

impl fmt::Debug for PaymentOperations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentOperations")
            .field("processor", &self.processor.name())
            .field("mode", &self.settings.mode)
            .field("currency", &self.settings.currency)
            .finish_non_exhaustive()
    }
}

impl PaymentOperations {
    /// Create the facade over a processor client and shared settings
    pub fn new(processor: Arc<dyn Processor>, settings: Arc<ProcessorConfig>, fields: Arc<FieldMap>) -> Self {
        Self {
            processor,
            settings,
            mapper: FieldMapper::new(fields),
        }
    }

    /// Create the facade from a loaded configuration
    pub fn from_config(processor: Arc<dyn Processor>, config: &Config) -> Self {
        Self::new(
            processor,
            Arc::new(config.processor.clone()),
            Arc::new(config.fields.clone()),
        )
    }

    /// Charge a card token or a saved customer
    pub async fn charge(&self, request: &ChargeRequest) -> Result<PaymentOutcome<ProjectedResult>> {
        let key = self.secret_key()?;
        let charge = request.to_new_charge(&self.settings.currency)?;

        match self.processor.create_charge(key, &charge).await {
            Ok(raw) => {
                info!(
                    target: LOG_TARGET,
                    charge_id = object_id(&raw),
                    amount = charge.amount,
                    currency = %charge.currency,
                    "charge created"
                );
                self.completed(OperationKind::Charge, &raw)
            }
            Err(e) => Ok(self.failed(&e)),
        }
    }

    /// Create a customer, optionally saving a card token on it
    pub async fn create_customer(&self, request: &CreateCustomerRequest) -> Result<PaymentOutcome<ProjectedResult>> {
        let key = self.secret_key()?;
        let customer = request.to_new_customer()?;

        match self.processor.create_customer(key, &customer).await {
            Ok(raw) => {
                info!(target: LOG_TARGET, customer_id = object_id(&raw), "customer created");
                self.completed(OperationKind::Customer, &raw)
            }
            Err(e) => Ok(self.failed(&e)),
        }
    }

    /// Attach a card token to a saved customer
    ///
    /// Projects either the customer (under [`OperationKind::Customer`]) or
    /// the new card (under [`OperationKind::NewCard`]), depending on
    /// [`CardAttachResult`].
    pub async fn add_card(&self, request: &AddCardRequest) -> Result<PaymentOutcome<ProjectedResult>> {
        let key = self.secret_key()?;
        let (customer_id, card) = request.validate()?;

        match self.attach(key, customer_id, card).await {
            Ok((customer, new_card)) => {
                info!(
                    target: LOG_TARGET,
                    customer_id,
                    card_id = object_id(&new_card),
                    "card added"
                );
                match self.settings.card_attach_result {
                    CardAttachResult::Customer => self.completed(OperationKind::Customer, &customer),
                    CardAttachResult::NewCard => self.completed(OperationKind::NewCard, &new_card),
                }
            }
            Err(e) => Ok(self.failed(&e)),
        }
    }

    /// List the cards saved on a customer
    pub async fn get_cards(&self, customer_id: &str) -> Result<PaymentOutcome<Vec<CardRecord>>> {
        let key = self.secret_key()?;
        let customer_id = required("customer", customer_id)?;

        match self.processor.list_cards(key, customer_id).await {
            Ok(cards) => {
                info!(target: LOG_TARGET, customer_id, count = cards.len(), "cards listed");
                Ok(PaymentOutcome::Completed(project_cards(&cards)))
            }
            Err(e) => Ok(self.failed(&e)),
        }
    }

    /// Refund a charge in full
    pub async fn refund(&self, request: &RefundRequest) -> Result<PaymentOutcome<ProjectedResult>> {
        let key = self.secret_key()?;
        let charge_id = request.validate()?;

        let refunded = match self.processor.retrieve_charge(key, charge_id).await {
            Ok(_) => self.processor.refund_charge(key, charge_id).await,
            Err(e) => Err(e),
        };

        match refunded {
            Ok(raw) => {
                info!(target: LOG_TARGET, charge_id, "charge refunded");
                self.completed(OperationKind::Refund, &raw)
            }
            Err(e) => Ok(self.failed(&e)),
        }
    }

    fn secret_key(&self) -> Result<&SecretString> {
        self.settings.secret_key().ok_or_else(|| {
            PaymentError::Configuration(format!(
                "no secret key configured for {} mode",
                self.settings.mode.as_str()
            ))
        })
    }

    /// Retrieve the customer, then attach the card; returns both objects
    async fn attach(
        &self,
        key: &SecretString,
        customer_id: &str,
        card: &str,
    ) -> cashier_core::Result<(RawResponse, RawResponse)> {
        let customer = self.processor.retrieve_customer(key, customer_id).await?;
        let new_card = self.processor.attach_card(key, customer_id, card).await?;
        Ok((customer, new_card))
    }

    fn completed(&self, kind: OperationKind, raw: &RawResponse) -> Result<PaymentOutcome<ProjectedResult>> {
        Ok(PaymentOutcome::Completed(self.mapper.project(kind, raw)?))
    }

    fn failed<T>(&self, error: &cashier_core::ProcessorError) -> PaymentOutcome<T> {
        PaymentOutcome::Failed(classify(self.processor.name(), error))
    }
}

fn object_id(raw: &RawResponse) -> &str {
    raw.get("id").and_then(RawResponse::as_str).unwrap_or_default()
}
