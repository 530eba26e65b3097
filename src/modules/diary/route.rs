use crate::modules::diary::handle::*;
use actix_web::web::{scope, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/diaries")
            .service(create_diary)
            .service(list_my_diaries)
            .service(share_diary)
            .service(unshare_diary)
            .service(get_diary)
            .service(delete_diary),
    );
}
