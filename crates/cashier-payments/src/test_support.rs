//! Shared helpers for unit tests

use std::io;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use cashier_core::{NewCharge, NewCustomer, Processor, ProcessorError, RawResponse, Result};
use secrecy::{ExposeSecret, SecretString};
use tracing::subscriber::DefaultGuard;

/// In-memory sink for formatted log lines
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn subscriber(buffer: LogBuffer) -> impl tracing::Subscriber + Send + Sync {
    tracing_subscriber::fmt()
        .with_writer(move || buffer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .finish()
}

/// Run `f` and return its output along with everything it logged
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let output = tracing::subscriber::with_default(subscriber(buffer.clone()), f);
    (output, buffer.contents())
}

/// Captures logs on the current thread until dropped
///
/// Meant for `current_thread` async tests, where every poll happens on the
/// thread that installed the guard.
pub struct LogCapture {
    buffer: LogBuffer,
    _guard: DefaultGuard,
}

impl LogCapture {
    pub fn start() -> Self {
        let buffer = LogBuffer::default();
        let guard = tracing::subscriber::set_default(subscriber(buffer.clone()));
        Self { buffer, _guard: guard }
    }

    pub fn logs(&self) -> String {
        self.buffer.contents()
    }
}

/// Processor call observed by [`FakeProcessor`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CreateCharge(NewCharge),
    CreateCustomer(NewCustomer),
    RetrieveCustomer(String),
    AttachCard { customer: String, card: String },
    ListCards(String),
    RetrieveCharge(String),
    RefundCharge(String),
}

/// Scripted processor that records every call and the key it was given
pub struct FakeProcessor {
    response: Result<RawResponse>,
    cards: Result<Vec<RawResponse>>,
    calls: Mutex<Vec<(Call, String)>>,
}

impl Default for FakeProcessor {
    fn default() -> Self {
        Self {
            response: Err(ProcessorError::Unknown("no scripted response".to_owned())),
            cards: Ok(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeProcessor {
    /// Answer every object call with `response`
    pub fn responding(response: RawResponse) -> Self {
        Self {
            response: Ok(response),
            ..Self::default()
        }
    }

    /// Fail every call with `error`
    pub fn failing(error: ProcessorError) -> Self {
        Self {
            response: Err(error.clone()),
            cards: Err(error),
            ..Self::default()
        }
    }

    /// Answer card listings with `cards`
    pub fn listing(cards: Vec<RawResponse>) -> Self {
        Self {
            cards: Ok(cards),
            ..Self::default()
        }
    }

    /// Calls made so far
    pub fn calls(&self) -> Vec<Call> {
        self.recorded().into_iter().map(|(call, _)| call).collect()
    }

    /// Secret keys passed so far
    pub fn keys(&self) -> Vec<String> {
        self.recorded().into_iter().map(|(_, key)| key).collect()
    }

    fn recorded(&self) -> Vec<(Call, String)> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn record(&self, key: &SecretString, call: Call) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((call, key.expose_secret().to_owned()));
    }
}

#[async_trait]
impl Processor for FakeProcessor {
    async fn create_charge(&self, key: &SecretString, charge: &NewCharge) -> Result<RawResponse> {
        self.record(key, Call::CreateCharge(charge.clone()));
        self.response.clone()
    }

    async fn create_customer(&self, key: &SecretString, customer: &NewCustomer) -> Result<RawResponse> {
        self.record(key, Call::CreateCustomer(customer.clone()));
        self.response.clone()
    }

    async fn retrieve_customer(&self, key: &SecretString, customer_id: &str) -> Result<RawResponse> {
        self.record(key, Call::RetrieveCustomer(customer_id.to_owned()));
        self.response.clone()
    }

    async fn attach_card(&self, key: &SecretString, customer_id: &str, card_token: &str) -> Result<RawResponse> {
        self.record(
            key,
            Call::AttachCard {
                customer: customer_id.to_owned(),
                card: card_token.to_owned(),
            },
        );
        self.response.clone()
    }

    async fn list_cards(&self, key: &SecretString, customer_id: &str) -> Result<Vec<RawResponse>> {
        self.record(key, Call::ListCards(customer_id.to_owned()));
        self.cards.clone()
    }

    async fn retrieve_charge(&self, key: &SecretString, charge_id: &str) -> Result<RawResponse> {
        self.record(key, Call::RetrieveCharge(charge_id.to_owned()));
        self.response.clone()
    }

    async fn refund_charge(&self, key: &SecretString, charge_id: &str) -> Result<RawResponse> {
        self.record(key, Call::RefundCharge(charge_id.to_owned()));
        self.response.clone()
    }

    fn name(&self) -> &str {
        "stripe"
    }
}
