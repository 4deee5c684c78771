pub mod modules;
pub use modules::auth;
pub use modules::verification;
pub mod api;
pub mod health;
pub mod shared;

use crate::api::openapi::ApiDoc;
use crate::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::auth::application::ports::outgoing::TokenProvider;
use crate::shared::api::{custom_json_config, custom_path_config};
use crate::shared::config::{load_env_files, required};
use crate::verification::adapter::outgoing::{
    RandomTokenGenerator, RegistrationLookupPostgres, VerificationQueryPostgres,
    VerificationRepositoryPostgres,
};
use crate::verification::application::presenter::VerificationPresenter;
use crate::verification::application::services::{
    GetCurrentVerificationService, InvalidateVerificationService, IssueVerificationService,
    PreviewVerificationService, RegenerateVerificationService, VerifyTokenService,
};
use crate::verification::application::verification_config::VerificationConfig;
use crate::verification::application::verification_use_cases::VerificationUseCases;

use actix_web::{web, App, HttpServer};
use sea_orm::{ConnectOptions, Database};
use std::io;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub verification: VerificationUseCases,
    pub verification_presenter: VerificationPresenter,
}

fn startup_error(context: &str, err: impl std::fmt::Display) -> io::Error {
    io::Error::other(format!("{context}: {err}"))
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting check-in service...");

    load_env_files();

    let db_url = required("DATABASE_URL").map_err(|e| startup_error("config", e))?;
    let host = required("HOST").map_err(|e| startup_error("config", e))?;
    let port = required("PORT").map_err(|e| startup_error("config", e))?;
    let verification_config =
        VerificationConfig::from_env().map_err(|e| startup_error("config", e))?;
    let jwt_config = JwtConfig::from_env().map_err(|e| startup_error("config", e))?;

    let server_url = format!("{host}:{port}");
    info!("Server run on: {}", server_url);

    // Database connection
    let mut opt = ConnectOptions::new(db_url);
    opt.max_connections(50)
        .min_connections(10)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let conn = Database::connect(opt)
        .await
        .map_err(|e| startup_error("Failed to connect to database", e))?;

    let db_arc = Arc::new(conn);

    // Verification components
    let verification_query = VerificationQueryPostgres::new(Arc::clone(&db_arc));
    let verification_repo = VerificationRepositoryPostgres::new(Arc::clone(&db_arc));
    let registration_lookup = RegistrationLookupPostgres::new(Arc::clone(&db_arc));
    let token_generator = RandomTokenGenerator::new(verification_config.token_length);

    let verification = VerificationUseCases {
        issue: Arc::new(IssueVerificationService::new(
            verification_query.clone(),
            verification_repo.clone(),
            registration_lookup.clone(),
            token_generator.clone(),
        )),
        regenerate: Arc::new(RegenerateVerificationService::new(
            verification_query.clone(),
            verification_repo.clone(),
            registration_lookup.clone(),
            token_generator,
        )),
        get_current: Arc::new(GetCurrentVerificationService::new(
            verification_query.clone(),
            registration_lookup.clone(),
        )),
        preview: Arc::new(PreviewVerificationService::new(
            verification_query.clone(),
            registration_lookup.clone(),
        )),
        verify: Arc::new(VerifyTokenService::new(
            verification_query.clone(),
            verification_repo.clone(),
            registration_lookup,
        )),
        invalidate: Arc::new(InvalidateVerificationService::new(
            verification_query,
            verification_repo,
        )),
    };

    let state = AppState {
        verification,
        verification_presenter: verification_config.presenter(),
    };

    let token_provider_arc: Arc<dyn TokenProvider + Send + Sync> =
        Arc::new(JwtTokenService::new(jwt_config));
    let db_for_server = Arc::clone(&db_arc);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&token_provider_arc)))
            .app_data(web::Data::new(Arc::clone(&db_for_server)))
            .app_data(custom_json_config())
            .app_data(custom_path_config())
            .configure(init_routes)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind(server_url)?
    .run()
    .await
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    use crate::verification::adapter::incoming::web::routes;

    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Subject-facing
    cfg.service(routes::issue_verification_handler);
    cfg.service(routes::regenerate_verification_handler);
    cfg.service(routes::get_verification_qr_handler);
    cfg.service(routes::get_current_verification_handler);
    // Check-in desk
    cfg.service(routes::preview_verification_handler);
    cfg.service(routes::verify_token_handler);
    cfg.service(routes::reject_verification_handler);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e}");
    }
}
