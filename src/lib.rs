pub mod config;
pub mod events;
pub mod export;
pub mod http_client;
pub mod match_index;
pub mod match_stats;
pub mod metrics;
pub mod open_data;
pub mod pipeline;
pub mod pitch;
pub mod scores;
pub mod season;

/// Shared tracing setup for the binaries; `RUST_LOG` overrides the default `info`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

/// Loads `.env.local` then `.env`; already-set variables win.
pub fn load_env_files() {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
}
