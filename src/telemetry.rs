use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::RunMode;

pub fn init(mode: RunMode) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match mode {
        RunMode::Release => "info".into(),
        RunMode::Debug => "info,json_fetcher=debug,tower_http=debug".into(),
    });

    let registry = tracing_subscriber::registry().with(filter);
    match mode {
        RunMode::Release => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        RunMode::Debug => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}
