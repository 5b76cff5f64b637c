//! App Router

use salvo::Router;

use crate::{contact, healthcheck, observability::metrics_handler, packages, sessions, tracking};

/// Every route the server answers, without state or middleware.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(metrics_handler))
        .push(Router::with_path("api/tracking/{tracking_id}").get(tracking::get::handler))
        .push(Router::with_path("api/contact").post(contact::create::handler))
        .push(Router::with_path("api/sessions").post(sessions::create::handler))
        .push(admin_router())
}

fn admin_router() -> Router {
    Router::new()
        .hoop(sessions::middleware::handler)
        .push(
            Router::with_path("api/packages")
                .get(packages::index::handler)
                .post(packages::create::handler)
                .push(Router::with_path("stats").get(packages::stats::handler))
                .push(
                    Router::with_path("{tracking_id}")
                        .delete(packages::delete::handler)
                        .push(
                            Router::with_path("location").put(packages::update_location::handler),
                        ),
                ),
        )
        .push(Router::with_path("api/sessions/current").delete(sessions::delete::handler))
}
