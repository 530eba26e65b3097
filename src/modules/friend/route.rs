use crate::modules::friend::handle::*;
use actix_web::web::{scope, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/friends")
            .service(send_request)
            .service(list_pending_requests)
            .service(respond_request)
            .service(list_friends)
            .service(remove_friend),
    );
}
