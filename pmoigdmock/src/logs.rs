//! Initialisation du logging (tracing)

use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

/// Options du logging
#[derive(Debug, Clone)]
pub struct LoggingOptions {
    /// Filtre utilisé quand `RUST_LOG` n'est pas défini (ex: "info,pmoigdmock=debug")
    pub default_filter: String,
    /// Activer la sortie vers la console
    pub enable_console: bool,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            default_filter: "info".to_string(),
            enable_console: true,
        }
    }
}

/// Installe le subscriber global.
///
/// Renvoie `false` si un subscriber était déjà installé (appel répété depuis
/// plusieurs tests par exemple).
///
/// ```no_run
/// use pmoigdmock::logs::{LoggingOptions, init_logging};
///
/// init_logging(LoggingOptions {
///     default_filter: "debug".to_string(),
///     enable_console: true,
/// });
/// ```
pub fn init_logging(options: LoggingOptions) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&options.default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = Registry::default().with(filter);

    let installed = if options.enable_console {
        subscriber
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_ansi(true),
            )
            .try_init()
    } else {
        subscriber.try_init()
    };

    installed.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_harmless() {
        let options = LoggingOptions {
            default_filter: "warn".to_string(),
            enable_console: false,
        };
        init_logging(options.clone());
        assert!(!init_logging(options));
    }
}
