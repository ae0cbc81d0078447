//! Subcommand implementations.

use anyhow::Result;

use crate::cli::SessionArgs;
use crate::config::{ConfigManager, ResolvedConfig, resolve_config};

/// One-shot prompt command handler.
pub mod ask;

/// Chat mode command handler.
pub mod chat;

/// Configure command handler.
pub mod configure;

/// Merges CLI flags over the config file and built-in defaults.
fn load_resolved_config(args: SessionArgs) -> Result<ResolvedConfig> {
    let manager = ConfigManager::new()?;
    let config_file = manager.load()?;
    resolve_config(&args.into(), &config_file)
}
