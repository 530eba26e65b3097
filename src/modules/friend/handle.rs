use actix_web::{delete, get, patch, post, web, HttpRequest};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::{
        friend::{
            model::{
                FriendRequestResponse, FriendRespondBody, FriendSummaryResponse,
                SendFriendRequestBody,
            },
            repository_pg::FriendRepositoryPg,
            service::FriendService,
        },
        notification::repository_pg::NotificationRepositoryPg,
        user::repository_pg::UserRepositoryPg,
    },
    utils::ValidatedJson,
};

pub type FriendSvc = FriendService<FriendRepositoryPg, UserRepositoryPg, NotificationRepositoryPg>;

#[post("/requests")]
pub async fn send_request(
    friend_service: web::Data<FriendSvc>,
    body: ValidatedJson<SendFriendRequestBody>,
    req: HttpRequest,
) -> Result<success::Success<Uuid>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let friend = friend_service.send_request(user_id, body.0.receiver_id).await?;
    Ok(success::Success::created(Some(friend.id)).message("Friend request sent"))
}

#[patch("/requests/{relationship_id}")]
pub async fn respond_request(
    friend_service: web::Data<FriendSvc>,
    relationship_id: web::Path<Uuid>,
    body: ValidatedJson<FriendRespondBody>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    friend_service.respond(user_id, *relationship_id, body.0.status).await?;
    Ok(success::Success::ok(None).message("Friend request updated"))
}

#[get("/requests")]
pub async fn list_pending_requests(
    friend_service: web::Data<FriendSvc>,
    req: HttpRequest,
) -> Result<success::Success<Vec<FriendRequestResponse>>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let requests = friend_service.get_pending_requests(user_id).await?;
    Ok(success::Success::ok(Some(requests)))
}

#[get("")]
pub async fn list_friends(
    friend_service: web::Data<FriendSvc>,
    req: HttpRequest,
) -> Result<success::Success<Vec<FriendSummaryResponse>>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let friends = friend_service.get_friends(user_id).await?;
    Ok(success::Success::ok(Some(friends)))
}

#[delete("/{relationship_id}")]
pub async fn remove_friend(
    friend_service: web::Data<FriendSvc>,
    relationship_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    friend_service.remove(user_id, *relationship_id).await?;
    Ok(success::Success::ok(None).message("Friend removed"))
}
