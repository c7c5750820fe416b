/// Runtime configuration, read once at startup. Every knob has a default
/// suitable for running `cargo run` from a fresh checkout.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP listener binds to.
    pub listen_addr: String,

    /// Path of the SQLite ledger file.
    pub db_path: String,

    /// Directory the chart artifacts are written to and served from.
    pub static_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            listen_addr: env_or("TRACKER_LISTEN_ADDR", "127.0.0.1:3000"),
            db_path: env_or("TRACKER_DB_PATH", "datafile.db"),
            static_dir: env_or("TRACKER_STATIC_DIR", "static"),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
