use std::time::Duration;

use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::config::Credentials;
use sea_orm::Database;
use tracing::info;

use skylift_api::config::ApiConfig;
use skylift_api::infra::gateway::DpoGateway;
use skylift_api::infra::storage::S3Storage;
use skylift_api::router::build_router;
use skylift_api::state::AppState;
use skylift_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing("info");

    let config = ApiConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let credentials = Credentials::new(
        &config.s3_access_key,
        &config.s3_secret_key,
        None,
        None,
        "env",
    );
    let sdk_config = aws_config::defaults(BehaviorVersion::latest())
        .endpoint_url(&config.s3_endpoint)
        .region(Region::new(config.s3_region.clone()))
        .credentials_provider(credentials)
        .load()
        .await;
    let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
        .force_path_style(true)
        .build();
    let storage = S3Storage::new(
        aws_sdk_s3::Client::from_conf(s3_config),
        config.s3_bucket.clone(),
        &config.s3_endpoint,
    );

    let gateway = DpoGateway::new(
        config.payment_gateway_url.clone(),
        config.company_token.clone(),
        Duration::from_secs(config.payment_gateway_timeout_secs),
        config.payment_gateway_max_concurrency,
    )
    .expect("failed to build payment gateway client");

    let state = AppState {
        db,
        storage,
        gateway,
        payment_redirect_base_url: config.payment_redirect_base_url.clone(),
    };

    let router = build_router(state);
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("api service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
