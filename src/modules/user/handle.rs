use actix_web::{get, post, web, HttpRequest};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::user::{
        model::{SignInBody, SignUpBody, TokenResponse, UserResponse},
        repository_pg::UserRepositoryPg,
        service::UserService,
    },
    utils::ValidatedJson,
};

pub type UserSvc = UserService<UserRepositoryPg>;

#[post("/sign-up")]
pub async fn sign_up(
    user_service: web::Data<UserSvc>,
    body: ValidatedJson<SignUpBody>,
) -> Result<success::Success<Uuid>, error::Error> {
    let user_id = user_service.sign_up(body.0).await?;
    Ok(success::Success::created(Some(user_id)).message("Account created successfully"))
}

#[post("/sign-in")]
pub async fn sign_in(
    user_service: web::Data<UserSvc>,
    body: ValidatedJson<SignInBody>,
) -> Result<success::Success<TokenResponse>, error::Error> {
    let access_token = user_service.sign_in(body.0).await?;
    Ok(success::Success::ok(Some(TokenResponse { access_token })))
}

#[get("/me")]
pub async fn get_profile(
    user_service: web::Data<UserSvc>,
    req: HttpRequest,
) -> Result<success::Success<UserResponse>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let user = user_service.get_by_id(user_id).await?;
    Ok(success::Success::ok(Some(user)))
}
