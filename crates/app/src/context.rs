//! App Context

use std::sync::Arc;

use storefront::shipping::ShippingRates;
use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        coupons::{CouponsService, PgCouponsService},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
        shipping::{RateTableShippingService, ShippingService},
    },
    health::{HealthService, PgHealthService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to run database migrations")]
    Migrations(#[source] sqlx::migrate::MigrateError),
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub coupons: Arc<dyn CouponsService>,
    pub orders: Arc<dyn OrdersService>,
    pub shipping: Arc<dyn ShippingService>,
    pub health: Arc<dyn HealthService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// All money handled by the services is in the currency of `rates`.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails, or when
    /// `run_migrations` is set and migrating fails.
    pub async fn from_database_url(
        url: &str,
        rates: ShippingRates<'static>,
        run_migrations: bool,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        if run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrations)?;
        }

        let db = Db::new(pool);
        let currency = rates.currency();

        Ok(Self {
            products: Arc::new(PgProductsService::new(db.clone())),
            coupons: Arc::new(PgCouponsService::new(db.clone(), currency)),
            orders: Arc::new(PgOrdersService::new(db.clone(), rates.clone())),
            shipping: Arc::new(RateTableShippingService::new(rates)),
            health: Arc::new(PgHealthService::new(db)),
        })
    }
}
