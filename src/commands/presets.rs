use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::{msg_info, msg_print};
use anyhow::Result;

pub fn cmd() -> Result<()> {
    let config = Config::read()?;
    if config.presets.is_empty() {
        msg_info!(Message::NoPresets);
        return Ok(());
    }

    msg_print!(Message::PresetsHeader, true);
    View::presets(&config.presets);
    Ok(())
}
