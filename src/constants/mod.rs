pub struct Env {
    pub jwt_secret: String,
    pub access_token_expiration: u64,
    pub database_url: String,
    pub frontend_url: String,
    pub ip: String,
    pub port: u16,
    pub sse_timeout_secs: u64,
}

impl Env {
    fn new() -> Self {
        let jwt_secret = std::env::var("SECRET_KEY")
            .expect("SECRET_KEY must be set in .env file or environment variable");

        let access_token_expiration = std::env::var("ACCESS_TOKEN_EXPIRATION")
            .unwrap_or_else(|_| "900".to_string())
            .parse::<u64>()
            .expect("ACCESS_TOKEN_EXPIRATION must be a valid u64 integer");

        let database_url = std::env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set in .env file or environment variable");

        let frontend_url =
            std::env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:5173".to_string());
        let ip = std::env::var("IP").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .expect("PORT must be a valid u16 integer");

        // Open SSE connections are force-closed after this deadline; clients reconnect.
        let sse_timeout_secs = std::env::var("SSE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "1800".to_string())
            .parse::<u64>()
            .expect("SSE_TIMEOUT_SECS must be a valid u64 integer");

        Env {
            jwt_secret,
            access_token_expiration,
            database_url,
            frontend_url,
            ip,
            port,
            sse_timeout_secs,
        }
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}
