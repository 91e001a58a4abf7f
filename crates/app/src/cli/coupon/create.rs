use clap::{ArgGroup, Args};
use jiff::{SignedDuration, Timestamp};
use storefront::coupons::CouponCode;
use storefront_app::{
    database::{self, Db},
    domain::{
        coupons::{
            CouponsService, PgCouponsService,
            data::NewCoupon,
            records::{CouponUuid, CouponValue},
        },
        products::records::{CategoryUuid, ProductUuid},
    },
};
use uuid::Uuid;

use crate::cli::parse_currency;

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("value").required(true).args(["percentage", "fixed"])))]
pub(crate) struct CreateCouponArgs {
    /// Coupon code; stored uppercased
    #[arg(long)]
    code: String,

    /// Whole-percent discount, 1 to 100
    #[arg(long)]
    percentage: Option<u16>,

    /// Fixed discount in minor units
    #[arg(long)]
    fixed: Option<u64>,

    /// Minimum order total in minor units; 0 for none
    #[arg(long, default_value_t = 0)]
    min_order_amount: u64,

    /// Discount cap in minor units; 0 for uncapped
    #[arg(long, default_value_t = 0)]
    max_discount: u64,

    /// Start of the validity window; defaults to now
    #[arg(long)]
    valid_from: Option<Timestamp>,

    /// Length of the validity window in days
    #[arg(long, default_value_t = 30)]
    valid_days: i64,

    /// Number of times the coupon can be redeemed
    #[arg(long, default_value_t = 1)]
    usage_limit: u32,

    /// Restrict to a product; repeatable
    #[arg(long = "product")]
    products: Vec<Uuid>,

    /// Restrict to a category; repeatable
    #[arg(long = "category")]
    categories: Vec<Uuid>,

    /// Store currency, used to validate amounts
    #[arg(long, env = "STORE_CURRENCY", default_value = "INR")]
    currency: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateCouponArgs) -> Result<(), String> {
    let currency = parse_currency(&args.currency)?;

    let code = CouponCode::parse(&args.code).map_err(|error| error.to_string())?;

    let value = match (args.percentage, args.fixed) {
        (Some(points), None) => CouponValue::Percentage(points),
        (None, Some(amount)) => CouponValue::Fixed(amount),
        _ => return Err("exactly one of --percentage or --fixed is required".to_string()),
    };

    let valid_from = args.valid_from.unwrap_or_else(Timestamp::now);

    let valid_until = args
        .valid_days
        .checked_mul(24)
        .map(SignedDuration::from_hours)
        .and_then(|window| valid_from.checked_add(window).ok())
        .ok_or_else(|| format!("--valid-days {} is out of range", args.valid_days))?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgCouponsService::new(Db::new(pool), currency);

    let coupon = service
        .create_coupon(NewCoupon {
            uuid: CouponUuid::new(),
            code,
            value,
            min_order_amount: args.min_order_amount,
            max_discount: args.max_discount,
            valid_from,
            valid_until,
            usage_limit: args.usage_limit,
            products: args.products.into_iter().map(ProductUuid::from).collect(),
            categories: args.categories.into_iter().map(CategoryUuid::from).collect(),
        })
        .await
        .map_err(|error| format!("failed to create coupon: {error}"))?;

    println!("coupon_uuid: {}", coupon.uuid);
    println!("code: {}", coupon.code);
    println!("valid_until: {}", coupon.valid_until);

    Ok(())
}
