use actix_web::{delete, get, post, web, HttpRequest};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::{
        diary::{
            model::{CreateDiaryBody, DiaryDetailResponse, DiarySummaryResponse, ShareDiaryBody},
            repository_pg::DiaryRepositoryPg,
            service::DiaryService,
        },
        friend::repository_pg::FriendRepositoryPg,
        notification::repository_pg::NotificationRepositoryPg,
        user::repository_pg::UserRepositoryPg,
    },
    utils::ValidatedJson,
};

pub type DiarySvc =
    DiaryService<DiaryRepositoryPg, FriendRepositoryPg, UserRepositoryPg, NotificationRepositoryPg>;

#[post("")]
pub async fn create_diary(
    diary_service: web::Data<DiarySvc>,
    body: ValidatedJson<CreateDiaryBody>,
    req: HttpRequest,
) -> Result<success::Success<DiaryDetailResponse>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let diary = diary_service.create_diary(user_id, body.0).await?;
    Ok(success::Success::created(Some(DiaryDetailResponse::from(diary)))
        .message("Diary created"))
}

#[get("")]
pub async fn list_my_diaries(
    diary_service: web::Data<DiarySvc>,
    req: HttpRequest,
) -> Result<success::Success<Vec<DiarySummaryResponse>>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let diaries = diary_service.list_my_diaries(user_id).await?;
    Ok(success::Success::ok(Some(diaries)))
}

#[get("/{diary_id}")]
pub async fn get_diary(
    diary_service: web::Data<DiarySvc>,
    diary_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<DiaryDetailResponse>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let diary = diary_service.get_diary(user_id, *diary_id).await?;
    Ok(success::Success::ok(Some(diary)))
}

#[delete("/{diary_id}")]
pub async fn delete_diary(
    diary_service: web::Data<DiarySvc>,
    diary_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    diary_service.delete_diary(user_id, *diary_id).await?;
    Ok(success::Success::ok(None).message("Diary deleted"))
}

#[post("/{diary_id}/shares")]
pub async fn share_diary(
    diary_service: web::Data<DiarySvc>,
    diary_id: web::Path<Uuid>,
    body: ValidatedJson<ShareDiaryBody>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    diary_service.share_diary(user_id, *diary_id, body.0.user_ids).await?;
    Ok(success::Success::ok(None).message("Diary shared"))
}

#[delete("/{diary_id}/shares/{user_id}")]
pub async fn unshare_diary(
    diary_service: web::Data<DiarySvc>,
    path: web::Path<(Uuid, Uuid)>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let (diary_id, target_user_id) = path.into_inner();
    diary_service.unshare_diary(user_id, diary_id, target_user_id).await?;
    Ok(success::Success::ok(None).message("Diary share removed"))
}
