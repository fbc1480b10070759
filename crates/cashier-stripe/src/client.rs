use std::time::Duration;

use async_trait::async_trait;
use cashier_config::ProcessorConfig;
use cashier_core::{NewCharge, NewCustomer, Processor, ProcessorError, RawResponse, Result};
use reqwest::RequestBuilder;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::error::{self, StripeError};

/// Async HTTP client for the Stripe REST API
///
/// The secret key is supplied per call, so one client can serve both test
/// and live mode.
#[derive(Clone)]
pub struct StripeClient {
    http: reqwest::Client,
    base_url: Url,
}

#[derive(Serialize)]
struct AttachCard<'a> {
    card: &'a str,
}

impl StripeClient {
    /// Create a new Stripe client
    ///
    /// `base_url` must end with `/`, e.g. `https://api.stripe.com/v1/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(base_url: Url, timeout: Option<Duration>) -> std::result::Result<Self, StripeError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url,
        })
    }

    /// Create a client from processor settings
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn from_config(config: &ProcessorConfig) -> std::result::Result<Self, StripeError> {
        Self::new(
            config.base_url.clone(),
            config.request_timeout_secs.map(Duration::from_secs),
        )
    }

    /// Build an endpoint URL, percent-encoding each segment
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ProcessorError::Unknown(format!("base URL `{}` cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder, key: &SecretString) -> Result<RawResponse> {
        let response = request
            .bearer_auth(key.expose_secret())
            .send()
            .await
            .map_err(|e| error::from_transport(&e))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| error::from_transport(&e))?;

        if !status.is_success() {
            let error = error::from_response(status, &body);
            tracing::debug!(status = status.as_u16(), family = error.family(), "stripe request failed");
            return Err(error);
        }

        serde_json::from_slice(&body)
            .map_err(|e| ProcessorError::Unknown(format!("undecodable stripe response: {e}")))
    }

    async fn get(&self, key: &SecretString, segments: &[&str]) -> Result<RawResponse> {
        let url = self.endpoint(segments)?;
        tracing::debug!(%url, "GET");
        self.send(self.http.get(url), key).await
    }

    async fn post<T: Serialize + Sync + ?Sized>(&self, key: &SecretString, segments: &[&str], form: &T) -> Result<RawResponse> {
        let url = self.endpoint(segments)?;
        tracing::debug!(%url, "POST");
        self.send(self.http.post(url).form(form), key).await
    }
}

#[async_trait]
impl Processor for StripeClient {
    async fn create_charge(&self, key: &SecretString, charge: &NewCharge) -> Result<RawResponse> {
        self.post(key, &["charges"], charge).await
    }

    async fn create_customer(&self, key: &SecretString, customer: &NewCustomer) -> Result<RawResponse> {
        self.post(key, &["customers"], customer).await
    }

    async fn retrieve_customer(&self, key: &SecretString, customer_id: &str) -> Result<RawResponse> {
        self.get(key, &["customers", customer_id]).await
    }

    async fn attach_card(&self, key: &SecretString, customer_id: &str, card_token: &str) -> Result<RawResponse> {
        self.post(key, &["customers", customer_id, "cards"], &AttachCard { card: card_token })
            .await
    }

    async fn list_cards(&self, key: &SecretString, customer_id: &str) -> Result<Vec<RawResponse>> {
        let list = self.get(key, &["customers", customer_id, "cards"]).await?;

        match list {
            Value::Object(mut object) => match object.remove("data") {
                Some(Value::Array(cards)) => Ok(cards),
                _ => Err(ProcessorError::Unknown("card list response has no `data` array".to_owned())),
            },
            _ => Err(ProcessorError::Unknown("card list response is not an object".to_owned())),
        }
    }

    async fn retrieve_charge(&self, key: &SecretString, charge_id: &str) -> Result<RawResponse> {
        self.get(key, &["charges", charge_id]).await
    }

    async fn refund_charge(&self, key: &SecretString, charge_id: &str) -> Result<RawResponse> {
        self.post(key, &["charges", charge_id, "refund"], &[] as &[(&str, &str)])
            .await
    }

    fn name(&self) -> &str {
        "stripe"
    }
}

impl std::fmt::Debug for StripeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
