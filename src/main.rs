use clap::Parser;
use log::debug;

use tabula_engine::cli::{
    self,
    parsers::{CliMode, CliParser},
};
use tabula_engine::config::Config;
use tabula_engine::logging::init_logging;

fn main() {
    let args = CliParser::parse();

    let config = match Config::load(&args) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("err: could not read .env file: {}", error);
            std::process::exit(2);
        }
    };

    init_logging(&config.log_filter);
    debug!("running with {:?}", config);

    let outcome = match &args.mode {
        CliMode::Client => cli::run_client(&config),
        CliMode::Tables => cli::run_tables(&config),
        CliMode::Show { table } => cli::run_show(&config, table),
        CliMode::Difference {
            left,
            right,
            result,
            dry_run,
        } => cli::run_difference(&config, left, right, result, *dry_run),
    };

    if let Err(message) = outcome {
        eprintln!("{}", message);
        std::process::exit(1);
    }
}
