use serde::Deserialize;

use mentpat_core::config::Config;

/// API service configuration, read from upper-cased env vars.
#[derive(Deserialize)]
pub struct ApiConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port to listen on. Env var: `PORT`.
    #[serde(default = "default_port")]
    pub port: u16,
    /// The single browser origin allowed to call the API with credentials.
    pub cors_origin: String,

    pub access_token_secret: String,
    /// Access-token lifetime in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry: u64,
    pub refresh_token_secret: String,
    /// Refresh-token lifetime in seconds.
    #[serde(default = "default_refresh_token_expiry")]
    pub refresh_token_expiry: u64,

    /// SMTP relay host. Empty disables delivery.
    #[serde(default)]
    pub mail_host: String,
    #[serde(default = "default_mail_port")]
    pub mail_port: u16,
    #[serde(default)]
    pub mail_user: String,
    #[serde(default)]
    pub mail_pass: String,
    #[serde(default = "default_mail_from_name")]
    pub mail_from_name: String,

    #[serde(default)]
    pub cloudinary_cloud_name: String,
    #[serde(default)]
    pub cloudinary_upload_preset: String,

    /// Directory served for paths no route matches.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

impl Config for ApiConfig {}

fn default_port() -> u16 {
    8001
}

fn default_access_token_expiry() -> u64 {
    86_400
}

fn default_refresh_token_expiry() -> u64 {
    864_000
}

fn default_mail_port() -> u16 {
    587
}

fn default_mail_from_name() -> String {
    "MENTPAT".to_owned()
}

fn default_static_dir() -> String {
    "public".to_owned()
}
