mod decl;
mod probe;

pub use decl::*;
pub use probe::*;

/// Logs to stderr, filtered by `ENVBIND_LOG` (default `info`).
pub fn init_log() {
    use tracing::level_filters::LevelFilter;
    use tracing_subscriber::{
        EnvFilter, layer::SubscriberExt, util::SubscriberInitExt,
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("ENVBIND_LOG")
                .from_env_lossy(),
        )
        .init();
}
