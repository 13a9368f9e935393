use std::path::Path;

use crate::prelude::*;
use docoutline_core::profile::{Profile, ProfileConfig, ProfileKind};

#[derive(Debug, Clone, Copy, clap::ValueEnum, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileArg {
    /// Thresholds for whole-directory processing (cap 50)
    Batch,
    /// Thresholds for a single document (cap 20)
    Interactive,
}

impl From<ProfileArg> for ProfileKind {
    fn from(p: ProfileArg) -> Self {
        match p {
            ProfileArg::Batch => ProfileKind::Batch,
            ProfileArg::Interactive => ProfileKind::Interactive,
        }
    }
}

/// Resolve the profile for a command.
///
/// The base is chosen from `--profile`, then the config file's `base`, then
/// `command_default`. Config file overrides are applied on top.
pub fn resolve_profile(global: &crate::Global, command_default: ProfileKind) -> Result<Profile> {
    let flag = global.profile.map(ProfileKind::from);

    let Some(path) = &global.config else {
        return Ok(flag.unwrap_or(command_default).profile());
    };

    let config = load_config(path)?;
    profile_from_config(config, flag, command_default)
}

fn load_config(path: &Path) -> Result<ProfileConfig> {
    let raw = std::fs::read_to_string(path)
        .wrap_err_with(|| f!("Failed to read config file {}", path.display()))?;

    log::debug!("loaded profile configuration from {}", path.display());

    ProfileConfig::from_toml_str(&raw)
        .map_err(|e| Error::Config(f!("{}: {}", path.display(), e)).into())
}

fn profile_from_config(
    mut config: ProfileConfig,
    flag: Option<ProfileKind>,
    command_default: ProfileKind,
) -> Result<Profile> {
    if flag.is_some() {
        config.base = flag;
    }

    config
        .resolve(command_default)
        .map_err(|e| Error::Config(e.to_string()).into())
}
