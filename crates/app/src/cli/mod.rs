use clap::{Parser, Subcommand};
use rusty_money::iso::{self, Currency};

mod coupon;
mod db;

#[derive(Debug, Parser)]
#[command(name = "storefront-app", about = "Storefront admin CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Coupon(coupon::CouponCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Coupon(command) => coupon::run(command).await,
        }
    }
}

/// Resolve an ISO 4217 code such as `INR`.
pub(crate) fn parse_currency(code: &str) -> Result<&'static Currency, String> {
    iso::find(&code.trim().to_ascii_uppercase())
        .ok_or_else(|| format!("unknown currency code {code:?}"))
}
