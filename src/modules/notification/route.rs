use crate::modules::notification::handle::*;
use actix_web::web::{scope, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/notifications")
            .service(mark_all_read)
            .service(mark_read)
            .service(list_notifications)
            .service(delete_notifications),
    );
}
