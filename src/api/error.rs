use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use std::borrow::Cow;

use crate::ENV;

/// Expected, user-facing business outcomes. Every variant carries a stable
/// code so clients can branch on it without parsing messages.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BusinessError {
    #[error("Cannot send a friend request to yourself")]
    SelfRequest,
    #[error("User not found")]
    UserNotFound,
    #[error("A friend request is already pending between these users")]
    AlreadyRequested,
    #[error("Users are already friends")]
    AlreadyFriend,
    #[error("Friend relationship not found")]
    RelationshipNotFound,
    #[error("No permission to perform this action")]
    Forbidden,
    #[error("The friend request has already been responded to")]
    InvalidState,
    #[error("Notification not found")]
    NotificationNotFound,
    #[error("Diary not found")]
    DiaryNotFound,
    #[error("No permission to access this diary")]
    DiaryAccessDenied,
    #[error("The diary is not shared with this user")]
    DiaryShareNotFound,
    #[error("Email is already in use")]
    EmailAlreadyExists,
    #[error("Invalid email or password")]
    InvalidCredentials,
}

impl BusinessError {
    pub fn code(&self) -> &'static str {
        match self {
            BusinessError::SelfRequest => "SELF_REQUEST",
            BusinessError::UserNotFound => "USER_NOT_FOUND",
            BusinessError::AlreadyRequested => "ALREADY_REQUESTED",
            BusinessError::AlreadyFriend => "ALREADY_FRIEND",
            BusinessError::RelationshipNotFound => "RELATIONSHIP_NOT_FOUND",
            BusinessError::Forbidden => "FORBIDDEN",
            BusinessError::InvalidState => "INVALID_STATE",
            BusinessError::NotificationNotFound => "NOTIFICATION_NOT_FOUND",
            BusinessError::DiaryNotFound => "DIARY_NOT_FOUND",
            BusinessError::DiaryAccessDenied => "DIARY_ACCESS_DENIED",
            BusinessError::DiaryShareNotFound => "DIARY_SHARE_NOT_FOUND",
            BusinessError::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            BusinessError::InvalidCredentials => "INVALID_CREDENTIALS",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            BusinessError::SelfRequest | BusinessError::InvalidState => StatusCode::BAD_REQUEST,
            BusinessError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            BusinessError::Forbidden | BusinessError::DiaryAccessDenied => StatusCode::FORBIDDEN,
            BusinessError::UserNotFound
            | BusinessError::RelationshipNotFound
            | BusinessError::NotificationNotFound
            | BusinessError::DiaryNotFound
            | BusinessError::DiaryShareNotFound => StatusCode::NOT_FOUND,
            BusinessError::AlreadyRequested
            | BusinessError::AlreadyFriend
            | BusinessError::EmailAlreadyExists => StatusCode::CONFLICT,
        }
    }
}

/// Service-layer error: business outcomes plus infrastructure failures.
/// Handlers convert this into an HTTP `Error`; infrastructure details never
/// leave the process.
#[derive(thiserror::Error, Debug)]
pub enum SystemError {
    #[error("JWT Error")]
    JwtError(#[from] jsonwebtoken::errors::Error),
    #[error("Hash Error")]
    HashError(#[from] argon2::password_hash::Error),
    #[error("Database Error: {0}")]
    DatabaseError(Cow<'static, str>),
    #[error("JSON Serialization/Deserialization Error")]
    JsonError(#[from] serde_json::Error),
    #[error("Database Conflict: {0:?}")]
    Conflict(Option<DbErrorMeta>),
    #[error(transparent)]
    Business(#[from] BusinessError),
    #[error("Internal System Error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

#[derive(Debug)]
pub struct DbErrorMeta {
    pub code: Option<String>,
    pub constraint: Option<String>,
    pub message: String,
}

impl From<sqlx::Error> for SystemError {
    fn from(err: sqlx::Error) -> Self {
        log::error!("{:?}", err);
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.code().as_deref() {
                Some("23505") => {
                    return SystemError::Conflict(Some(DbErrorMeta {
                        code: db_err.code().map(|s| s.to_string()),
                        constraint: db_err.constraint().map(|s| s.to_string()),
                        message: db_err.message().to_string(),
                    }));
                }
                _ => {
                    return SystemError::DatabaseError(db_err.message().to_string().into());
                }
            }
        }
        SystemError::InternalError(Box::new(err))
    }
}

fn conflict_message(meta: &Option<DbErrorMeta>) -> Cow<'static, str> {
    let Some(m) = meta else {
        return "Duplicate value".into();
    };

    let Some(constraint) = &m.constraint else {
        return "Duplicate value".into();
    };

    let field = constraint.split('_').next_back().unwrap_or("value");

    let mut chars = field.chars();
    let field = match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => "Value".to_string(),
    };

    format!("{field} already exists").into()
}

/// HTTP-layer error returned from handlers and middleware.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Business(#[from] BusinessError),
    #[error("Bad Request: {0}")]
    BadRequest(Cow<'static, str>),
    #[error("Unauthorized: {0}")]
    Unauthorized(Cow<'static, str>),
    #[error("Conflict: {0}")]
    Conflict(Cow<'static, str>),
    #[error("Internal Server Error")]
    InternalServer,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: Cow<'static, str>,
    pub message: Cow<'static, str>,
}

impl Error {
    pub fn bad_request(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn unauthorized(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Unauthorized(msg.into())
    }

    fn body(&self) -> ErrorBody {
        match self {
            Error::Business(b) => {
                ErrorBody { code: b.code().into(), message: b.to_string().into() }
            }
            Error::BadRequest(msg) => ErrorBody { code: "BAD_REQUEST".into(), message: msg.clone() },
            Error::Unauthorized(msg) => {
                ErrorBody { code: "UNAUTHORIZED".into(), message: msg.clone() }
            }
            Error::Conflict(msg) => ErrorBody { code: "CONFLICT".into(), message: msg.clone() },
            Error::InternalServer => {
                ErrorBody { code: "INTERNAL_ERROR".into(), message: "Internal Server Error".into() }
            }
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::Business(b) => b.status_code(),
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Error::Conflict(_) => StatusCode::CONFLICT,
            Error::InternalServer => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut res = HttpResponse::build(self.status_code());

        res.insert_header(("Access-Control-Allow-Origin", ENV.frontend_url.as_str()));
        res.insert_header(("Access-Control-Allow-Credentials", "true"));

        res.json(self.body())
    }
}

impl From<SystemError> for Error {
    fn from(value: SystemError) -> Self {
        match value {
            SystemError::Business(b) => Error::Business(b),
            SystemError::Conflict(meta) => Error::Conflict(conflict_message(&meta)),
            _ => {
                log::error!("Internal Server Error: {:?}", value);
                Error::InternalServer
            }
        }
    }
}
