use crate::error::CoreError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `log_level`. With `json` set, events are
/// flattened into one JSON object per line.
pub fn init_tracing(service_name: &str, log_level: &str, json: bool) -> Result<(), CoreError> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_file(true)
                    .with_line_number(true)
                    .json()
                    .flatten_event(true),
            )
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init()
    };

    result.map_err(|e| {
        CoreError::Tracing(format!(
            "failed to install subscriber for '{}': {}",
            service_name, e
        ))
    })?;

    tracing::debug!(service = %service_name, "Tracing initialized");
    Ok(())
}
