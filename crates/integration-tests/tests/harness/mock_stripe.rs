//! Mock Stripe API for integration tests
//!
//! Wraps a `wiremock` server with canned Stripe responses. Every mock
//! requires the bearer key from [`TEST_SECRET`](super::config::TEST_SECRET).

use serde_json::{Value, json};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::config::TEST_SECRET;

/// Mock Stripe backend
pub struct MockStripe {
    server: MockServer,
}

impl MockStripe {
    /// Start an empty mock server
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL to configure as `processor.base_url`
    pub fn base_url(&self) -> String {
        format!("{}/v1/", self.server.uri())
    }

    /// Respond to `method path` with `status` and a JSON body
    pub async fn respond(&self, verb: &str, route: &str, status: u16, body: Value) {
        Mock::given(method(verb))
            .and(path(format!("/v1/{route}")))
            .and(header("authorization", format!("Bearer {TEST_SECRET}").as_str()))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Accept a charge of exactly `amount` minor units
    pub async fn charge_succeeds(&self, amount: i64) {
        Mock::given(method("POST"))
            .and(path("/v1/charges"))
            .and(body_string_contains(format!("amount={amount}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(charge(amount, false)))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Decline every charge
    pub async fn charge_declined(&self) {
        self.respond(
            "POST",
            "charges",
            402,
            json!({
                "error": {
                    "type": "card_error",
                    "code": "card_declined",
                    "decline_code": "insufficient_funds",
                    "message": "Your card has insufficient funds.",
                    "param": ""
                }
            }),
        )
        .await;
    }

    /// Reject any key on any route
    pub async fn rejects_key(&self) {
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {
                    "type": "invalid_request_error",
                    "message": "Invalid API Key provided: sk_test_****tion"
                }
            })))
            .mount(&self.server)
            .await;
    }

    /// Fail every request with a 500
    pub async fn is_down(&self) {
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "error": { "type": "api_error", "message": "An unknown error occurred" }
            })))
            .mount(&self.server)
            .await;
    }

    /// Serve a customer and its saved cards
    pub async fn customer_with_cards(&self, customer_id: &str, cards: Vec<Value>) {
        self.respond(
            "GET",
            &format!("customers/{customer_id}"),
            200,
            json!({
                "id": customer_id,
                "object": "customer",
                "email": "ada@example.com",
                "cards": { "object": "list", "data": cards.clone() }
            }),
        )
        .await;
        self.respond(
            "GET",
            &format!("customers/{customer_id}/cards"),
            200,
            json!({ "object": "list", "data": cards, "has_more": false }),
        )
        .await;
    }

    /// Accept a full refund of `charge_id`
    pub async fn refund_succeeds(&self, charge_id: &str, amount: i64) {
        let mut refunded = charge(amount, true);
        refunded["id"] = json!(charge_id);

        self.respond("GET", &format!("charges/{charge_id}"), 200, charge(amount, false)).await;
        self.respond("POST", &format!("charges/{charge_id}/refund"), 200, refunded).await;
    }

    /// Requests received so far
    pub async fn received(&self) -> Vec<wiremock::Request> {
        self.server.received_requests().await.unwrap_or_default()
    }
}

/// Visa card object as Stripe returns it
pub fn card(id: &str, last4: &str) -> Value {
    json!({
        "id": id,
        "object": "card",
        "last4": last4,
        "type": "Visa",
        "name": "Ada Lovelace",
        "exp_month": 4,
        "exp_year": 2031,
        "address_line1": "12 Analytical Row",
        "address_line2": null,
        "address_city": "London",
        "address_state": null,
        "address_zip": "N1 9GU",
        "country": "GB",
        "cvc_check": "pass",
        "address_zip_check": "pass"
    })
}

fn charge(amount: i64, refunded: bool) -> Value {
    json!({
        "id": "ch_test_1",
        "object": "charge",
        "amount": amount,
        "amount_refunded": if refunded { amount } else { 0 },
        "currency": "usd",
        "paid": true,
        "refunded": refunded,
        "customer": null,
        "card": card("card_test_1", "4242")
    })
}
