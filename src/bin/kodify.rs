use kodify::cli::run_cli;
use kodify::logging::{init_logging_with_config, LogConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging_with_config(&LogConfig::from_env())?;
    run_cli()
}
