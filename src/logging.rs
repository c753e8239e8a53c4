use tracing::Level;

pub fn level_from_str(value: &str) -> Level {
    match value.trim().to_ascii_lowercase().as_str() {
        "error" => Level::ERROR,
        "warn" | "warning" => Level::WARN,
        "debug" => Level::DEBUG,
        _ => Level::INFO,
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn configured_level() -> Level {
    level_from_str(&std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()))
}

/// Browser builds have no environment; debug builds log more.
#[cfg(target_arch = "wasm32")]
pub fn configured_level() -> Level {
    if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

/// Installs the global subscriber before launch so the launcher keeps it.
pub fn init() {
    let level = configured_level();
    if dioxus::logger::init(level).is_ok() {
        tracing::debug!("logging: level {level}");
    }
}
