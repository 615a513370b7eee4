use actix_web::{web, HttpServer};
use anyhow::Context as _;
use dotenvy::dotenv;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use am_api::app::create_app;
use am_api::config::Config;
use am_api::routes::AppState;
use am_core::services::account::{AccountService, AccountServiceConfig};
use am_core::services::reset::{PasswordResetService, ResetTokenSweeper, SweeperConfig};
use am_core::services::token::{TokenService, TokenServiceConfig};
use am_infra::{create_pool, EmailService, MySqlPasswordResetRepository, MySqlUserRepository};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging; the default subscriber also captures `log`
    // records from the framework.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting AutoMart API server");

    // Refuses to start without a provisioned JWT_SECRET.
    let config =
        Config::from_env().context("configuration error: JWT_SECRET must be provisioned")?;

    let pool = create_pool(&config.database)
        .await
        .context("failed to connect to the database")?;

    let user_repository = Arc::new(MySqlUserRepository::new(pool.clone()));
    let reset_repository = Arc::new(MySqlPasswordResetRepository::new(pool.clone()));

    let token_service = Arc::new(
        TokenService::new(TokenServiceConfig::from(&config.auth))
            .context("token service rejected the signing secret")?,
    );

    let email_service = Arc::new(EmailService::new(config.email.clone()));

    let account_service = Arc::new(AccountService::new(
        user_repository.clone(),
        PasswordResetService::new(reset_repository.clone()),
        email_service,
        token_service.clone(),
        AccountServiceConfig::from(&config.auth),
    ));

    // Background sweep of expired reset tokens.
    ResetTokenSweeper::new(reset_repository, SweeperConfig::default()).spawn();

    let app_state = web::Data::new(AppState {
        account_service,
        token_service,
    });

    let bind_address = config.server.bind_address();
    let environment = config.environment;
    info!("Server listening on {}", bind_address);

    HttpServer::new(move || create_app(app_state.clone(), environment))
        .bind(&bind_address)?
        .run()
        .await?;

    Ok(())
}
