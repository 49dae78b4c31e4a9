use clap::Parser;
use smock::cli::{Cli, Commands, Verbosity};
use smock::config::Config;
use smock::ui::formatter::Formatter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logs go to stderr; `RUST_LOG` overrides the verbosity flags and
/// `SMOCK_LOG_JSON` switches to one JSON object per event.
fn initialize_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("smock={}", verbosity.to_log_level())));

    let (text_layer, json_layer) = if std::env::var_os("SMOCK_LOG_JSON").is_some() {
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true);
        (None, Some(layer.json()))
    } else {
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true);
        (Some(layer), None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(text_layer)
        .with(json_layer)
        .init();
}

fn main() -> miette::Result<()> {
    Formatter::configure_colors_from_env();

    let cli = Cli::parse();

    // The config is read before tracing so its log level applies.
    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };

    initialize_tracing(cli.verbosity(&config));

    if let Some(err) = config_error {
        eprintln!(
            "{}",
            Formatter::warning(format!("Warning: ignoring config file: {err}"))
        );
    }

    match cli.command {
        Commands::Query(mut args) => {
            args.merge_config(&config);
            smock::cli::commands::query(args)
        }
        Commands::List(mut args) => {
            args.merge_config(&config);
            smock::cli::commands::list(args)
        }
    }
}
