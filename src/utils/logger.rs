use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable, one line per event.
    #[default]
    Compact,
    /// Machine-readable, for runs driven by a scheduler that ships logs elsewhere.
    Json,
}

fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "directory_etl=debug,info"
    } else {
        "directory_etl=info"
    }
}

/// `RUST_LOG` wins over the verbosity flag when set.
pub fn init_logger(verbose: bool, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    fn base<S>() -> tracing_subscriber::fmt::Layer<S> {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
    }

    let (compact, json) = match format {
        LogFormat::Compact => (Some(base().compact()), None),
        LogFormat::Json => (None, Some(base().json())),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(compact)
        .with(json)
        .init();
}
