//! Profiling command handler.

use crate::cli::args::ProfileCli;
use crate::error::Result;
use crate::profile::{ProfileManager, ProfileOptions};

/// Handle a `son-profile` invocation.
pub fn handle_profile(cli: ProfileCli) -> Result<()> {
    let options = ProfileOptions {
        config: cli.config,
        work_dir: cli.work_dir,
        no_generation: cli.no_generation,
    };

    let manager = ProfileManager::new(&options)?;
    manager.prepare()?;

    println!("{}", manager.summary());
    Ok(())
}
