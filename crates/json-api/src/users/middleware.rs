//! User header middleware.

use salvo::prelude::*;
use storefront_app::domain::users::records::UserUuid;
use uuid::Uuid;

use crate::extensions::*;

pub(crate) const USER_UUID_HEADER: &str = "x-user-uuid";

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(user) = extract_user_uuid(req) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid x-user-uuid header"));

        return;
    };

    depot.insert_user_uuid(user);

    ctrl.call_next(req, depot, res).await;
}

fn extract_user_uuid(req: &Request) -> Option<UserUuid> {
    let value = req.headers().get(USER_UUID_HEADER)?.to_str().ok()?;

    Uuid::parse_str(value.trim()).ok().map(UserUuid::from_uuid)
}
