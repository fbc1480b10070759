use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Cashier payment operations
#[derive(Debug, Parser)]
#[command(name = "cashier", about = "Run payment operations against the configured processor")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "cashier.toml", env = "CASHIER_CONFIG")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Charge a card token or a saved customer
    Charge {
        /// Amount in major currency units, e.g. 19.99
        #[arg(long)]
        amount: String,
        /// Card token
        #[arg(long)]
        token: Option<String>,
        /// Saved customer id
        #[arg(long)]
        customer: Option<String>,
        /// Charge description
        #[arg(long)]
        description: Option<String>,
    },
    /// Create a customer
    CreateCustomer {
        #[arg(long)]
        email: String,
        /// Card token to save on the customer
        #[arg(long)]
        token: Option<String>,
    },
    /// Attach a card token to a customer
    AddCard {
        #[arg(long)]
        customer: String,
        #[arg(long)]
        card: String,
    },
    /// List the cards saved on a customer
    Cards {
        #[arg(long)]
        customer: String,
    },
    /// Refund a charge in full
    Refund {
        #[arg(long = "charge-id")]
        charge_id: String,
    },
}
