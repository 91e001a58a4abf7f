use clap::Args;
use storefront_app::{
    database::{self, Db},
    domain::coupons::{CouponsService, PgCouponsService, records::CouponValue},
};

use crate::cli::parse_currency;

#[derive(Debug, Args)]
pub(crate) struct ListCouponsArgs {
    /// Store currency
    #[arg(long, env = "STORE_CURRENCY", default_value = "INR")]
    currency: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: ListCouponsArgs) -> Result<(), String> {
    let currency = parse_currency(&args.currency)?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let coupons = PgCouponsService::new(Db::new(pool), currency)
        .list_coupons()
        .await
        .map_err(|error| format!("failed to list coupons: {error}"))?;

    if coupons.is_empty() {
        println!("no coupons found");
        return Ok(());
    }

    for coupon in coupons {
        println!("code: {}", coupon.code);
        match coupon.value {
            CouponValue::Percentage(points) => println!("discount: {points}%"),
            CouponValue::Fixed(amount) => println!("discount: {amount} {}", currency.iso_alpha_code),
        }
        println!("used: {}/{}", coupon.used_count, coupon.usage_limit);
        println!("valid: {} .. {}", coupon.valid_from, coupon.valid_until);
        println!("active: {}", coupon.active);
        println!();
    }

    Ok(())
}
