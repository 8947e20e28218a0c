use std::sync::Arc;

use auth::Authenticator;
use chrono::Duration;
use demo_service::config::Config;
use demo_service::config::S3Config;
use demo_service::domain::account::service::AccountService;
use demo_service::domain::dummy::service::DummyService;
use demo_service::domain::files::service::FileService;
use demo_service::inbound::http::router::create_router;
use demo_service::inbound::http::router::AppState;
use demo_service::outbound::repositories::PostgresAccountRepository;
use demo_service::outbound::repositories::PostgresDummyRepository;
use demo_service::outbound::storage::DiskFileStore;
use demo_service::outbound::storage::S3FileStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "demo_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "demo-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        upload_dir = %config.storage.upload_dir,
        s3 = config.s3.is_some(),
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::new(config.jwt.secret.as_bytes()));

    let account_repository = Arc::new(PostgresAccountRepository::new(pg_pool.clone()));
    let account_service = Arc::new(AccountService::new(
        account_repository,
        Arc::clone(&authenticator),
        Duration::minutes(config.jwt.access_token_ttl_minutes),
    ));

    let dummy_repository = Arc::new(PostgresDummyRepository::new(pg_pool));
    let dummy_service = Arc::new(DummyService::new(dummy_repository));

    let file_service = Arc::new(FileService::new(Arc::new(DiskFileStore::new(
        config.storage.upload_dir.clone(),
    ))));

    let s3_file_service = match config.s3 {
        Some(ref s3_config) => Some(Arc::new(FileService::new(Arc::new(
            s3_file_store(s3_config).await,
        )))),
        None => None,
    };

    let state = AppState {
        account_service,
        dummy_service,
        file_service,
        s3_file_service,
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(state)).await?;

    Ok(())
}

async fn s3_file_store(config: &S3Config) -> S3FileStore {
    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()))
        .load()
        .await;

    let s3_config = aws_sdk_s3::config::Builder::from(&aws_config)
        .force_path_style(true)
        .build();

    let client = aws_sdk_s3::Client::from_conf(s3_config);
    tracing::info!(
        bucket = %config.bucket,
        region = %config.region,
        "S3 client initialised"
    );

    S3FileStore::new(client, config.bucket.clone(), config.prefix.clone())
}
