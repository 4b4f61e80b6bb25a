use std::error::Error;

use clap::Parser;
use human_panic::setup_panic;

use pepscan::cli::Args;
use pepscan::logging::{
    default_log_dir, init_logging, log_critical_error, log_shutdown, log_system_info,
    set_log_level,
};
use pepscan::run;

fn main() -> Result<(), Box<dyn Error>> {
    setup_panic!();

    let args = Args::parse();
    set_log_level(args.verbose);
    let log_dir = match (&args.log_dir, args.log_to_file) {
        (Some(dir), _) => Some(dir.clone()),
        (None, true) => Some(default_log_dir()),
        (None, false) => None,
    };
    init_logging(log_dir.as_deref())?;
    log_system_info();

    let config = args.into_config();
    match run(&config) {
        Ok(summary) => {
            println!("{}", summary.message());
            log_shutdown();
            Ok(())
        }
        Err(e) => {
            // log_critical_error already wrote to stderr
            log_critical_error(&e.to_string(), Some("scan"));
            log_shutdown();
            std::process::exit(1);
        }
    }
}
