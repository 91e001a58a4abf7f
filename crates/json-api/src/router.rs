//! App Router

use salvo::Router;

use crate::{coupons, orders, products, shipping, users};

/// Routes served under `/api`.
pub(crate) fn api_router() -> Router {
    Router::with_path("api")
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .get(products::get::handler)
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
        .push(
            Router::with_path("coupons")
                .get(coupons::index::handler)
                .post(coupons::create::handler)
                .push(Router::with_path("validate").post(coupons::validate::handler))
                .push(
                    Router::with_path("{code}")
                        .get(coupons::get::handler)
                        .delete(coupons::delete::handler),
                ),
        )
        .push(Router::with_path("shipping/calculate").post(shipping::calculate::handler))
        .push(
            Router::with_path("orders")
                .hoop(users::middleware::handler)
                .get(orders::index::handler)
                .post(orders::create::handler)
                .push(
                    Router::with_path("{order}")
                        .get(orders::get::handler)
                        .push(Router::with_path("status").put(orders::status::handler))
                        .push(Router::with_path("payment").put(orders::payment::handler)),
                ),
        )
}
