use actix_web::{
    self, App, HttpServer,
    middleware::{Logger, from_fn},
    web,
};
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use crate::{
    configs::connect_database,
    middlewares::authentication,
    modules::{
        diary::{repository_pg::DiaryRepositoryPg, service::DiaryService},
        friend::{repository_pg::FriendRepositoryPg, service::FriendService},
        notification::{repository_pg::NotificationRepositoryPg, service::NotificationService},
        sse::registry::SseRegistry,
        user::{repository_pg::UserRepositoryPg, service::UserService},
    },
};

mod api;
mod configs;
mod constants;
mod middlewares;
mod modules;
#[cfg(test)]
mod test_support;
mod utils;

pub static ENV: LazyLock<constants::Env> = LazyLock::new(|| {
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Environment variables loaded from .env file");
    constants::Env::default()
});

#[actix_web::get("/")]
async fn health_check() -> &'static str {
    "Server is running"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let db_pool =
        connect_database().await.map_err(|_| std::io::Error::other("Database connection error"))?;

    sqlx::migrate!()
        .run(&db_pool)
        .await
        .map_err(|e| std::io::Error::other(format!("Migration error: {e}")))?;

    let user_repo = Arc::new(UserRepositoryPg::new(db_pool.clone()));
    let friend_repo = Arc::new(FriendRepositoryPg::new(db_pool.clone()));
    let diary_repo = Arc::new(DiaryRepositoryPg::new(db_pool.clone()));
    let notification_repo = Arc::new(NotificationRepositoryPg::new(db_pool.clone()));
    let sse_registry = Arc::new(SseRegistry::new(Duration::from_secs(ENV.sse_timeout_secs)));

    let user_service = UserService::with_dependencies(Arc::clone(&user_repo));
    let notification_service = NotificationService::with_dependencies(
        Arc::clone(&notification_repo),
        Arc::clone(&sse_registry),
    );
    let friend_service = FriendService::with_dependencies(
        Arc::clone(&friend_repo),
        Arc::clone(&user_repo),
        notification_service.clone(),
    );
    let diary_service = DiaryService::with_dependencies(
        Arc::clone(&diary_repo),
        Arc::clone(&friend_repo),
        Arc::clone(&user_repo),
        notification_service.clone(),
    );

    println!("Starting server at http://{}:{}", ENV.ip.as_str(), ENV.port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(user_service.clone()))
            .app_data(web::Data::new(friend_service.clone()))
            .app_data(web::Data::new(diary_service.clone()))
            .app_data(web::Data::new(notification_service.clone()))
            .app_data(web::Data::from(Arc::clone(&sse_registry)))
            .app_data(web::Data::new(db_pool.clone()))
            .service(health_check)
            .service(
                web::scope("/api").configure(modules::user::route::public_api_configure).service(
                    web::scope("")
                        .wrap(from_fn(authentication))
                        .configure(modules::user::route::configure)
                        .configure(modules::friend::route::configure)
                        .configure(modules::diary::route::configure)
                        .configure(modules::notification::route::configure)
                        .configure(modules::sse::route::configure),
                ),
            )
    })
    .bind((ENV.ip.as_str(), ENV.port))?
    .workers(2)
    .run()
    .await
}
