use std::env;

/// Port used when `PORT` is unset or blank.
pub const DEFAULT_PORT: u16 = 5000;

/// AppConfig
///
/// Holds the application's configuration. Loaded once at startup and shared
/// read-only with every request through `FromRef`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // TCP port the HTTP server binds on (all interfaces).
    pub port: u16,
    // Runtime environment marker. Selects the log output format.
    pub env: Env,
}

/// Env
///
/// Runtime context. `Local` logs human-readable output, `Production` logs JSON.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// Test-friendly configuration that does not touch the environment.
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            env: Env::Local,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads `APP_ENV` and `PORT` from the environment.
    ///
    /// # Panics
    /// Panics if `PORT` is non-blank but is not a valid port number.
    pub fn load() -> Self {
        let env = match env::var("APP_ENV").as_deref() {
            Ok("production") => Env::Production,
            _ => Env::Local,
        };

        // An empty or blank PORT counts as unset.
        let port = match env::var("PORT").ok().filter(|raw| !raw.trim().is_empty()) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .expect("FATAL: PORT must be a valid port number"),
            None => DEFAULT_PORT,
        };

        Self { port, env }
    }

    /// Socket address string the server binds to.
    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
