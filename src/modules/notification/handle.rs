use actix_web::{delete, get, patch, web, HttpRequest};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::notification::{
        model::{DeleteQuery, NotificationResponse},
        repository_pg::NotificationRepositoryPg,
        service::NotificationService,
    },
};

pub type NotificationSvc = NotificationService<NotificationRepositoryPg>;

#[get("")]
pub async fn list_notifications(
    notification_service: web::Data<NotificationSvc>,
    req: HttpRequest,
) -> Result<success::Success<Vec<NotificationResponse>>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let notifications = notification_service.get_notifications(user_id).await?;
    Ok(success::Success::ok(Some(notifications)))
}

#[patch("/{notification_id}/read")]
pub async fn mark_read(
    notification_service: web::Data<NotificationSvc>,
    notification_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    notification_service.mark_read(user_id, *notification_id).await?;
    Ok(success::Success::ok(None).message("Notification marked as read"))
}

#[patch("/read-all")]
pub async fn mark_all_read(
    notification_service: web::Data<NotificationSvc>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    notification_service.mark_all_read(user_id).await?;
    Ok(success::Success::ok(None).message("All notifications marked as read"))
}

#[delete("")]
pub async fn delete_notifications(
    notification_service: web::Data<NotificationSvc>,
    query: web::Query<DeleteQuery>,
    req: HttpRequest,
) -> Result<success::Success<u64>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let deleted = notification_service.delete_all(user_id, query.read).await?;
    Ok(success::Success::ok(Some(deleted)).message("Notifications deleted"))
}
