//! Operation inputs and their validation

use cashier_core::{NewCharge, NewCustomer};
use serde::{Deserialize, Serialize};

use crate::error::{PaymentError, Result};

/// Largest major-unit amount whose minor-unit value fits in an `i64`
const MAX_MAJOR_AMOUNT: f64 = 90_000_000_000_000_000.0;

/// Charge amount in major currency units as supplied by the caller
///
/// Callers often forward form input untouched, so both numbers and numeric
/// strings are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    /// Numeric amount, e.g. `19.99`
    Number(f64),
    /// Textual amount, e.g. `"19.99"`
    Text(String),
}

impl Amount {
    /// Convert to integer minor units (cents), rounding to the nearest unit
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::Validation`] if the amount is not numeric,
    /// not finite, negative, or too large
    #[allow(clippy::cast_possible_truncation, reason = "bounded by MAX_MAJOR_AMOUNT above")]
    pub fn to_minor_units(&self) -> Result<i64> {
        let major = match self {
            Self::Number(value) => *value,
            Self::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| PaymentError::Validation(format!("amount must be numeric, got `{text}`")))?,
        };

        if !major.is_finite() {
            return Err(PaymentError::Validation("amount must be numeric".to_owned()));
        }

        if major < 0.0 {
            return Err(PaymentError::Validation("amount must not be negative".to_owned()));
        }

        if major >= MAX_MAJOR_AMOUNT {
            return Err(PaymentError::Validation("amount is too large".to_owned()));
        }

        Ok((major * 100.0).round() as i64)
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Amount {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Input of [`PaymentOperations::charge`](crate::PaymentOperations::charge)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeRequest {
    /// Amount in major currency units
    pub amount: Amount,
    /// Single-use card token
    #[serde(default, alias = "stripeToken")]
    pub stripe_token: Option<String>,
    /// Saved customer to charge
    #[serde(default)]
    pub customer: Option<String>,
    /// Optional charge description
    #[serde(default)]
    pub description: Option<String>,
}

impl ChargeRequest {
    /// Charge a tokenized card
    pub fn with_token(amount: impl Into<Amount>, token: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            stripe_token: Some(token.into()),
            customer: None,
            description: None,
        }
    }

    /// Charge a saved customer's default card
    pub fn for_customer(amount: impl Into<Amount>, customer: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            stripe_token: None,
            customer: Some(customer.into()),
            description: None,
        }
    }

    /// Set the description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Validate and build the processor parameters
    pub(crate) fn to_new_charge(&self, currency: &str) -> Result<NewCharge> {
        let card = non_empty(self.stripe_token.as_deref());
        let customer = non_empty(self.customer.as_deref());

        if card.is_none() && customer.is_none() {
            return Err(PaymentError::Validation(
                "a card token or a customer is required to make a charge".to_owned(),
            ));
        }

        Ok(NewCharge {
            amount: self.amount.to_minor_units()?,
            currency: currency.to_owned(),
            description: self.description.clone(),
            card,
            customer,
        })
    }
}

/// Input of [`PaymentOperations::create_customer`](crate::PaymentOperations::create_customer)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCustomerRequest {
    /// Customer email address
    #[serde(default)]
    pub email: String,
    /// Card token to save on the customer
    #[serde(default, alias = "stripeToken")]
    pub stripe_token: Option<String>,
}

impl CreateCustomerRequest {
    /// Customer with an email only
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            stripe_token: None,
        }
    }

    /// Save a card token on the new customer
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.stripe_token = Some(token.into());
        self
    }

    pub(crate) fn to_new_customer(&self) -> Result<NewCustomer> {
        let email = required("email", &self.email)?;

        Ok(NewCustomer {
            email: email.to_owned(),
            card: non_empty(self.stripe_token.as_deref()),
        })
    }
}

/// Input of [`PaymentOperations::add_card`](crate::PaymentOperations::add_card)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddCardRequest {
    /// Customer id
    #[serde(default)]
    pub customer: String,
    /// Card token to attach
    #[serde(default)]
    pub card: String,
}

impl AddCardRequest {
    /// Attach `card` to `customer`
    pub fn new(customer: impl Into<String>, card: impl Into<String>) -> Self {
        Self {
            customer: customer.into(),
            card: card.into(),
        }
    }

    pub(crate) fn validate(&self) -> Result<(&str, &str)> {
        Ok((required("customer", &self.customer)?, required("card", &self.card)?))
    }
}

/// Input of [`PaymentOperations::refund`](crate::PaymentOperations::refund)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundRequest {
    /// Charge to refund in full
    #[serde(default)]
    pub charge_id: Option<String>,
}

impl RefundRequest {
    /// Refund `charge_id`
    pub fn new(charge_id: impl Into<String>) -> Self {
        Self {
            charge_id: Some(charge_id.into()),
        }
    }

    pub(crate) fn validate(&self) -> Result<&str> {
        let Some(charge_id) = self.charge_id.as_deref() else {
            return Err(PaymentError::Validation("the charge id is missing".to_owned()));
        };

        if charge_id.trim().is_empty() {
            return Err(PaymentError::Validation("the charge id is empty".to_owned()));
        }

        Ok(charge_id)
    }
}

/// Reject empty or whitespace-only required inputs
pub(crate) fn required<'a>(name: &str, value: &'a str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(PaymentError::Validation(format!("{name} is required")));
    }
    Ok(value)
}

/// Treat empty optional inputs as absent
fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).map(str::to_owned)
}
