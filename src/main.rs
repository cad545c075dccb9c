//! lpo-sync CLI entry point.

use clap::Parser;
use tracing::Instrument;
use uuid::Uuid;

use lpo_sync::cli::commands::{config, month, sync, validate};
use lpo_sync::cli::{Cli, Commands};
use lpo_sync::infrastructure::config::ConfigLoader;
use lpo_sync::infrastructure::logging::{LogConfig, LoggerImpl};
use lpo_sync::services::Workflow;

#[tokio::main]
async fn main() {
    let Cli {
        command,
        json,
        config: config_file,
    } = Cli::parse();
    let config_path = config_file.as_deref();

    // Logging follows the configured level; a broken config is reported by
    // the command itself.
    let log_config = ConfigLoader::load_with(config_path)
        .map(|c| LogConfig::from(&c.logging))
        .unwrap_or_default();
    let _logger = LoggerImpl::init(&log_config).ok();

    let run_id = Uuid::new_v4();
    let span = tracing::info_span!("run", %run_id);

    let result = async {
        match command {
            Commands::Validate(args) => validate::execute(args, config_path, json).await,
            Commands::LeadCollection(args) => {
                sync::execute(Workflow::LeadCollection, args, config_path, json).await
            }
            Commands::NotTouch(args) => {
                sync::execute(Workflow::NotTouch, args, config_path, json).await
            }
            Commands::Month(args) => month::execute(&args, json),
            Commands::Config(args) => config::execute(&args, config_path, json),
        }
    }
    .instrument(span)
    .await;

    if let Err(err) = result {
        lpo_sync::cli::handle_error(&err, json);
    }
}
