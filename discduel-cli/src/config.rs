/// Config file loading and creation for the discduel CLI.
///
/// Config lives at ~/.config/discduel/config.toml.
/// All fields are optional — CLI args and env vars override config values.
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::bail;

#[derive(Deserialize, Default)]
pub struct DiscduelConfig {
    /// Spotify app client ID (also reads SPOTIFY_CLIENT_ID env var).
    pub client_id: Option<String>,
    /// Spotify app client secret (also reads SPOTIFY_CLIENT_SECRET env var).
    pub client_secret: Option<String>,
    /// Market for album listings (default "US").
    pub market: Option<String>,
    /// Base URL printed in front of share tokens.
    pub share_base: Option<String>,
}

const DEFAULT_CONFIG_TEMPLATE: &str = "\
# discduel configuration
# All values here can be overridden by CLI flags.

# Spotify app credentials, used by `discduel albums` and `discduel rank --album`.
# Create an app at https://developer.spotify.com/dashboard to get these.
# client_id = \"...\"
# client_secret = \"...\"

# Market for album listings
# market = \"US\"

# Base URL printed in front of share tokens, e.g. https://discduel.app/s/
# share_base = \"https://discduel.app/s/\"
";

/// Returns the default config path: ~/.config/discduel/config.toml
pub fn config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| bail("HOME environment variable not set"));
    PathBuf::from(home).join(".config").join("discduel").join("config.toml")
}

/// Load config from a file path. Returns default (all None) if file doesn't exist.
pub fn load_config(path: &Path) -> DiscduelConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            toml::from_str(&content)
                .unwrap_or_else(|e| bail(format!("Failed to parse config at {}: {e}", path.display())))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => DiscduelConfig::default(),
        Err(e) => bail(format!("Failed to read config at {}: {e}", path.display())),
    }
}

/// Create the default config file. Errors if it already exists.
pub fn create_default_config() -> PathBuf {
    let path = config_path();

    if path.exists() {
        bail(format!("Config file already exists at {}", path.display()));
    }

    // Create parent directories
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| bail(format!("Failed to create directory {}: {e}", parent.display())));
    }

    std::fs::write(&path, DEFAULT_CONFIG_TEMPLATE)
        .unwrap_or_else(|e| bail(format!("Failed to write config to {}: {e}", path.display())));

    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_partial_config() {
        let cfg: DiscduelConfig =
            toml::from_str("client_id = \"abc\"\nmarket = \"SE\"\n").unwrap();
        assert_eq!(cfg.client_id.as_deref(), Some("abc"));
        assert_eq!(cfg.market.as_deref(), Some("SE"));
        assert!(cfg.client_secret.is_none());
        assert!(cfg.share_base.is_none());
    }

    #[test]
    fn test_empty_config_is_all_none() {
        let cfg: DiscduelConfig = toml::from_str("").unwrap();
        assert!(cfg.client_id.is_none());
        assert!(cfg.share_base.is_none());
    }

    #[test]
    fn test_default_template_is_valid_toml() {
        let cfg: Result<DiscduelConfig, _> = toml::from_str(DEFAULT_CONFIG_TEMPLATE);
        assert!(cfg.is_ok());
    }
}
