//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Server settings shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    pub templates_dir: String,
    /// Directory that holds the public `images/` tree.
    pub web_root: String,
    /// Signs session cookies and identity tokens; at least 64 bytes.
    pub secret: String,
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: i64,
    #[serde(default)]
    pub cookie_secure: bool,
    #[serde(default)]
    pub seed_data: bool,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

fn default_session_ttl_hours() -> i64 {
    24
}
