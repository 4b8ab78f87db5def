use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;
use log::{info, warn};

use todo_api::{app::create_app, routes::auth::AppState};
use todo_core::services::{
    AuthService, AuthServiceConfig, BcryptPasswordHasher, RefreshTokenService,
    RefreshTokenServiceConfig, TokenService, TokenServiceConfig,
};
use todo_infra::{
    DatabasePool, MySqlAccessTokenRepository, MySqlRefreshTokenRepository, MySqlUserRepository,
};
use todo_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env();
    info!("Starting ToDoList auth API ({})", config.environment);

    if config.auth.jwt.is_using_default_secret() {
        warn!("JWT_SECRET is not set, using the development secret");
    }
    let problems = config.startup_problems();
    for problem in &problems {
        warn!("Configuration problem: {}", problem);
    }
    if config.environment.is_production() && !problems.is_empty() {
        anyhow::bail!("refusing to start with {} configuration problem(s)", problems.len());
    }

    let pool = DatabasePool::new(config.database.clone(), config.logging.log_statements)
        .await
        .context("failed to connect to the database")?;
    pool.run_migrations()
        .await
        .context("failed to apply database migrations")?;

    let user_repository = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));
    let token_repository = Arc::new(MySqlAccessTokenRepository::new(pool.get_pool().clone()));
    let refresh_repository = Arc::new(MySqlRefreshTokenRepository::new(pool.get_pool().clone()));

    let token_service = Arc::new(
        TokenService::new(token_repository, TokenServiceConfig::from(&config.auth.jwt))
            .context("invalid JWT signing configuration")?,
    );
    let refresh_service = Arc::new(RefreshTokenService::new(
        refresh_repository,
        RefreshTokenServiceConfig::from(&config.auth.jwt),
    ));
    let auth_service = Arc::new(AuthService::new(
        user_repository,
        Arc::new(BcryptPasswordHasher::new(config.auth.bcrypt_cost)),
        token_service,
        refresh_service,
        AuthServiceConfig::from(&config.auth),
    ));

    let app_state = web::Data::new(AppState { auth_service });
    let cors_config = config.cors.clone();

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(app_state.clone(), &cors_config))
        .keep_alive(Duration::from_secs(config.server.keep_alive));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    pool.close().await;
    Ok(())
}
