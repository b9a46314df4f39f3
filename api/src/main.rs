use std::sync::Arc;

use actix_web::{middleware::Logger, web, HttpServer};
use anyhow::Context;
use dotenv::dotenv;
use log::{info, warn};

use rh_api::{create_app, middleware::create_cors, AppState};
use rh_core::repositories::{InMemoryBookingRepository, InMemoryItemRepository, InMemoryUserRepository};
use rh_core::{
    BookingRepository, BookingService, EventBus, ItemRepository, TokenService, TokenServiceConfig,
    UserRepository,
};
use rh_infra::database::DatabasePool;
use rh_shared::config::{AppConfig, LoggingConfig, StorageBackend};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let config = rh_api::config::load().context("failed to load configuration")?;

    init_logging(&config.logging);

    info!("Starting RentHub API Server ({})", config.environment);

    if config.auth.jwt.is_using_default_secret() {
        warn!("JWT_SECRET not set, using the development secret");
    }

    match config.database.backend {
        StorageBackend::Memory => {
            warn!("Using in-memory storage, data is lost on restart");
            serve(
                config,
                Arc::new(InMemoryBookingRepository::new()),
                Arc::new(InMemoryItemRepository::new()),
                Arc::new(InMemoryUserRepository::new()),
                None,
            )
            .await
        }
        StorageBackend::MySql => {
            let infra = rh_infra::initialize(&config.database)
                .await
                .context("failed to initialize the database")?;
            info!("Database pool ready: {}", infra.pool.get_statistics());

            let pool = infra.pool.clone();
            let result = serve(config, infra.bookings, infra.items, infra.users, Some(infra.pool)).await;
            pool.close().await;
            result
        }
    }
}

fn init_logging(logging: &LoggingConfig) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::new().default_filter_or(logging.level.as_str()));
    if !logging.timestamp {
        builder.format_timestamp(None);
    }
    builder.format_module_path(logging.module_path).init();
}

/// Wires the engine over the chosen repositories and runs the HTTP server
async fn serve<B, I, U>(
    config: AppConfig,
    bookings: Arc<B>,
    items: Arc<I>,
    users: Arc<U>,
    database: Option<DatabasePool>,
) -> anyhow::Result<()>
where
    B: BookingRepository + 'static,
    I: ItemRepository + 'static,
    U: UserRepository + 'static,
{
    let events = Arc::new(EventBus::new());
    let booking_service = Arc::new(BookingService::new(bookings, items, users, events.clone()));

    let mut state = AppState::new(booking_service, events, config.events.clone());
    if let Some(pool) = database {
        state = state.with_database(pool);
    }
    let state = web::Data::new(state);
    let tokens = web::Data::new(TokenService::new(TokenServiceConfig::from(&config.auth.jwt)));

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let cors_config = config.cors.clone();
    let max_payload = config.server.max_payload_size;

    let mut server = HttpServer::new(move || {
        create_app(state.clone(), tokens.clone(), max_payload)
            .wrap(create_cors(&cors_config))
            .wrap(Logger::default())
    })
    .keep_alive(std::time::Duration::from_secs(config.server.keep_alive));

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    info!("Server stopped");
    Ok(())
}
