use clap::Args;
use storefront_app::{
    database::{self, Db},
    domain::coupons::{CouponsService, PgCouponsService},
};

use crate::cli::parse_currency;

#[derive(Debug, Args)]
pub(crate) struct DeactivateCouponArgs {
    /// Coupon code
    #[arg(long)]
    code: String,

    /// Store currency
    #[arg(long, env = "STORE_CURRENCY", default_value = "INR")]
    currency: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: DeactivateCouponArgs) -> Result<(), String> {
    let currency = parse_currency(&args.currency)?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let coupon = PgCouponsService::new(Db::new(pool), currency)
        .deactivate_coupon(&args.code)
        .await
        .map_err(|error| format!("failed to deactivate coupon: {error}"))?;

    println!("coupon {} deactivated", coupon.code);

    Ok(())
}
