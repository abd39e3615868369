/// API service configuration loaded from environment variables.
#[derive(Debug)]
pub struct ApiConfig {
    /// TCP bind address (default `0.0.0.0`). Env var: `HOST`.
    pub host: String,
    /// TCP port to listen on (default 3000). Env var: `PORT`.
    pub port: u16,
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// S3-compatible storage API endpoint (e.g. "https://sgp1.digitaloceanspaces.com").
    pub s3_endpoint: String,
    /// S3 region.
    pub s3_region: String,
    /// S3 access key id.
    pub s3_access_key: String,
    /// S3 secret access key.
    pub s3_secret_key: String,
    /// Bucket receiving uploaded photos. Public object URLs are
    /// `{endpoint}/{bucket}/{key}` (path-style).
    pub s3_bucket: String,
    /// Outbound mail relay host. Presence is required at startup.
    pub mail_host: String,
    /// Outbound mail server port.
    pub mail_port: u16,
    /// Outbound mail user.
    pub mail_user: String,
    /// Outbound mail password.
    pub mail_password: String,
    /// DPO company token identifying the merchant account.
    pub company_token: String,
    /// Payment gateway endpoint (default the DPO v6 API).
    pub payment_gateway_url: String,
    /// Public base URL the gateway redirects payers back to
    /// (e.g. "https://api.example.com").
    pub payment_redirect_base_url: String,
    /// Per-call gateway timeout in seconds (default 30).
    pub payment_gateway_timeout_secs: u64,
    /// Max concurrent outbound gateway calls (default 8).
    pub payment_gateway_max_concurrency: usize,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_owned()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            s3_endpoint: std::env::var("S3_STORAGE_ENDPOINT").expect("S3_STORAGE_ENDPOINT"),
            s3_region: std::env::var("S3_STORAGE_REGION").expect("S3_STORAGE_REGION"),
            s3_access_key: std::env::var("S3_STORAGE_ACCESS_KEY").expect("S3_STORAGE_ACCESS_KEY"),
            s3_secret_key: std::env::var("S3_STORAGE_SECRET_KEY").expect("S3_STORAGE_SECRET_KEY"),
            s3_bucket: std::env::var("S3_STORAGE_BUCKET").expect("S3_STORAGE_BUCKET"),
            mail_host: std::env::var("MAIL_HOST").expect("MAIL_HOST"),
            mail_port: std::env::var("MAIL_PORT")
                .expect("MAIL_PORT")
                .parse()
                .expect("MAIL_PORT must be a number"),
            mail_user: std::env::var("MAIL_USER").expect("MAIL_USER"),
            mail_password: std::env::var("MAIL_PASSWORD").expect("MAIL_PASSWORD"),
            company_token: std::env::var("COMPANY_TOKEN").expect("COMPANY_TOKEN"),
            payment_gateway_url: std::env::var("PAYMENT_GATEWAY_URL")
                .unwrap_or_else(|_| "https://secure.3gdirectpay.com/API/v6/".to_owned()),
            payment_redirect_base_url: std::env::var("PAYMENT_REDIRECT_BASE_URL")
                .expect("PAYMENT_REDIRECT_BASE_URL"),
            payment_gateway_timeout_secs: std::env::var("PAYMENT_GATEWAY_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            payment_gateway_max_concurrency: std::env::var("PAYMENT_GATEWAY_MAX_CONCURRENCY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8),
        }
    }
}
