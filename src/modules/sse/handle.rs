use actix_web::{get, web, HttpRequest, HttpResponse};

use crate::{
    api::error,
    middlewares::get_claims,
    modules::{sse::registry::SseRegistry, user::handle::UserSvc},
};

/// Opens the event stream for the authenticated user. EventSource clients
/// cannot set headers, so the token usually arrives as a `token` query
/// parameter.
#[get("/connect")]
pub async fn connect(
    registry: web::Data<SseRegistry>,
    user_service: web::Data<UserSvc>,
    req: HttpRequest,
) -> Result<HttpResponse, error::Error> {
    let user_id = get_claims(&req)?.sub;
    user_service.get_by_id(user_id).await?;

    let stream = registry.into_inner().connect(user_id);

    Ok(HttpResponse::Ok()
        .content_type("text/event-stream")
        .insert_header(("Cache-Control", "no-cache"))
        .streaming(stream))
}
