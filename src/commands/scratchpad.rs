use crate::{
    db::scratchpad::Scratchpads,
    libs::messages::Message,
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct ScratchpadArgs {
    #[command(subcommand)]
    command: Option<ScratchpadCommand>,
}

#[derive(Debug, Subcommand)]
enum ScratchpadCommand {
    /// Print the scratchpad
    Show,
    /// Replace the scratchpad content
    Save {
        /// New content
        content: String,
    },
}

pub fn cmd(args: ScratchpadArgs) -> Result<()> {
    let mut scratchpads = Scratchpads::new()?;

    match args.command.unwrap_or(ScratchpadCommand::Show) {
        ScratchpadCommand::Show => {
            let scratchpad = scratchpads.get()?;
            if scratchpad.content.is_empty() {
                msg_info!(Message::ScratchpadEmpty);
            } else {
                msg_print!(scratchpad.content);
            }
            msg_print!(Message::ScratchpadLastModified(
                scratchpad.last_modified.format("%Y-%m-%d %H:%M").to_string()
            ));
        }
        ScratchpadCommand::Save { content } => {
            scratchpads.save(&content)?;
            msg_success!(Message::ScratchpadSaved);
        }
    }

    Ok(())
}
