//! son-profile - SONATA profiling tool
//!
//! Validates a profiling experiment descriptor and prepares the work
//! directory for the experiments it declares.

use clap::Parser;

use son_cli::cli::commands::handle_profile;
use son_cli::cli::ProfileCli;
use son_cli::config::settings::env;

fn main() {
    let cli = match ProfileCli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = i32::from(e.use_stderr());
            let _ = e.print();
            std::process::exit(code);
        }
    };

    son_cli::init_logging(env::PROFILE_LOG, cli.verbose);
    tracing::info!("SONATA profiling tool initialized");

    if let Err(e) = handle_profile(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
