use std::net::SocketAddr;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

/// Runtime settings for the toy backend. Everything has a fixed default, so
/// a bare `appeals-backend` is immediately usable against the console.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub admin_username: String,
    pub admin_password: String,
    pub access_token: String,
    pub refresh_token: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], 5000))),
            admin_username: "admin".to_string(),
            admin_password: "admin".to_string(),
            access_token: "auth_token".to_string(),
            refresh_token: "refresh_token".to_string(),
        }
    }
}

impl Config {
    #[must_use]
    pub fn for_tests() -> Self {
        Self::default()
    }
}
