//! Configuration initialization command.
//!
//! Writes `config.json` with every section set to its default so it can be
//! edited by hand, or removes it with `--delete`.

use crate::{
    libs::{config::Config, messages::Message},
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Remove existing configuration instead of creating a new one
    #[arg(short, long)]
    delete: bool,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    if init_args.delete {
        if Config::delete()? {
            msg_success!(Message::ConfigDeleted);
        } else {
            msg_info!(Message::ConfigNotFound);
        }
        return Ok(());
    }

    // Keep sections the user already set, fill in the rest
    let current = Config::read()?;
    let defaults = Config::with_defaults();
    Config {
        defaults: current.defaults.or(defaults.defaults),
        clock: current.clock.or(defaults.clock),
    }
    .save()?;

    msg_success!(Message::ConfigSaved);
    Ok(())
}
