//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use storefront_app::{
    context::AppContext,
    domain::{
        coupons::MockCouponsService, orders::MockOrdersService, products::MockProductsService,
        shipping::MockShippingService, users::records::UserUuid,
    },
    health::MockHealthService,
};
use uuid::Uuid;

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

pub(crate) const TEST_TIMESTAMP: Timestamp = Timestamp::UNIX_EPOCH;

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_user_uuid(TEST_USER_UUID);
    ctrl.call_next(req, depot, res).await;
}

/// Service mocks; any call without an expectation fails the test.
#[derive(Default)]
pub(crate) struct Mocks {
    pub products: MockProductsService,
    pub coupons: MockCouponsService,
    pub orders: MockOrdersService,
    pub shipping: MockShippingService,
    pub health: MockHealthService,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            products: Arc::new(self.products),
            coupons: Arc::new(self.coupons),
            orders: Arc::new(self.orders),
            shipping: Arc::new(self.shipping),
            health: Arc::new(self.health),
        })
    }

    /// Serve `route` with these mocks and the test user in the depot.
    pub(crate) fn service(self, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state()))
                .hoop(inject_user)
                .push(route),
        )
    }

    /// Serve `route` with these mocks and no user in the depot.
    pub(crate) fn anonymous_service(self, route: Router) -> Service {
        Service::new(Router::new().hoop(inject(self.into_state())).push(route))
    }
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    Mocks {
        products,
        ..Mocks::default()
    }
    .service(route)
}

pub(crate) fn coupons_service(coupons: MockCouponsService, route: Router) -> Service {
    Mocks {
        coupons,
        ..Mocks::default()
    }
    .service(route)
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    Mocks {
        orders,
        ..Mocks::default()
    }
    .service(route)
}

pub(crate) fn shipping_service(shipping: MockShippingService, route: Router) -> Service {
    Mocks {
        shipping,
        ..Mocks::default()
    }
    .service(route)
}
