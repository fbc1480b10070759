#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;

use std::process::ExitCode;
use std::sync::Arc;

use args::{Args, Command};
use cashier_config::Config;
use cashier_payments::{
    AddCardRequest, Amount, ChargeRequest, CreateCustomerRequest, PaymentOperations, PaymentOutcome, RefundRequest,
};
use cashier_stripe::StripeClient;
use clap::Parser;
use serde::Serialize;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let config = Config::load(&args.config)?;

    cashier_telemetry::init(&config.logging)?;

    tracing::debug!(
        config_path = %args.config.display(),
        mode = config.processor.mode.as_str(),
        "configuration loaded"
    );

    let client = StripeClient::from_config(&config.processor)?;
    let operations = PaymentOperations::from_config(Arc::new(client), &config);

    match args.command {
        Command::Charge {
            amount,
            token,
            customer,
            description,
        } => {
            let request = ChargeRequest {
                amount: Amount::Text(amount),
                stripe_token: token,
                customer,
                description,
            };
            report(operations.charge(&request).await?)
        }
        Command::CreateCustomer { email, token } => {
            let request = CreateCustomerRequest {
                email,
                stripe_token: token,
            };
            report(operations.create_customer(&request).await?)
        }
        Command::AddCard { customer, card } => {
            report(operations.add_card(&AddCardRequest::new(customer, card)).await?)
        }
        Command::Cards { customer } => report(operations.get_cards(&customer).await?),
        Command::Refund { charge_id } => report(operations.refund(&RefundRequest::new(charge_id)).await?),
    }
}

/// Print a completed result as JSON on stdout, or the failure on stderr
fn report<T: Serialize>(outcome: PaymentOutcome<T>) -> anyhow::Result<ExitCode> {
    match outcome {
        PaymentOutcome::Completed(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(ExitCode::SUCCESS)
        }
        PaymentOutcome::Failed(failure) => {
            eprintln!("{failure}");
            Ok(ExitCode::FAILURE)
        }
    }
}
