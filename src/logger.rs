use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Keeps the non-blocking file writer alive; drop it last.
pub struct TracingGuard {
    _file: Option<WorkerGuard>,
}

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over `level`. The console layer writes to
/// stderr and should be off while the terminal form owns the screen.
pub fn init_tracing(level: &str, console: bool, diagnostics_dir: Option<&Path>) -> TracingGuard {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console_layer = console.then(|| fmt::layer().with_writer(std::io::stderr).with_target(false));

    let (file_layer, file_guard) = match diagnostics_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::never(dir, "order_bot.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();

    TracingGuard { _file: file_guard }
}
