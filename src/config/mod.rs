use anyhow::Context;
use directories::{BaseDirs, ProjectDirs};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::FetchError;
use crate::library;
use crate::lyrics::{ArtistFallback, LrclibClient, Provider, ProviderKind, QueryStrategy, SpotifyClient};

/// Environment variable holding the access token for token-based providers.
pub const TOKEN_ENV: &str = "FETCH_LYRICS_TOKEN";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub library: LibraryConfig,
    pub lookup: LookupConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Directory the LRC files are written to (default: ~/Music/Music).
    pub root: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    pub provider: ProviderKind,
    pub strategy: QueryStrategy,
    pub fallback: ArtistFallback,
    pub lrclib_url: String,
    /// Access token for `spotify`. `FETCH_LYRICS_TOKEN` takes precedence.
    pub token: Option<String>,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            strategy: QueryStrategy::default(),
            fallback: ArtistFallback::default(),
            lrclib_url: LrclibClient::DEFAULT_BASE_URL.to_string(),
            token: None,
        }
    }
}

/// Command line values that win over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub library_root: Option<PathBuf>,
    pub provider: Option<ProviderKind>,
    pub strategy: Option<QueryStrategy>,
    pub fallback: Option<ArtistFallback>,
}

/// Everything a run needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub library_root: PathBuf,
    pub strategy: QueryStrategy,
    pub fallback: ArtistFallback,
    pub provider: ProviderKind,
    pub lrclib_url: String,
    pub token: Option<String>,
}

impl Settings {
    /// Merge file config, overrides and environment values.
    ///
    /// `home` and `env_token` are passed in so this stays independent of the
    /// process environment.
    pub fn resolve(
        cfg: Config,
        overrides: Overrides,
        home: Option<&Path>,
        env_token: Option<String>,
    ) -> Result<Self, FetchError> {
        let library_root = match overrides.library_root.or(cfg.library.root) {
            Some(root) => root,
            None => {
                let home = home.ok_or_else(|| FetchError::Config("home directory not found".to_string()))?;
                library::default_root(home)
            }
        };

        let provider = overrides.provider.unwrap_or(cfg.lookup.provider);
        let token = env_token
            .or(cfg.lookup.token)
            .filter(|t| !t.trim().is_empty());
        if provider == ProviderKind::Spotify && token.is_none() {
            return Err(FetchError::Config(format!(
                "provider spotify needs an access token ({} or lookup.token)",
                TOKEN_ENV
            )));
        }

        Ok(Self {
            library_root,
            strategy: overrides.strategy.unwrap_or(cfg.lookup.strategy),
            fallback: overrides.fallback.unwrap_or(cfg.lookup.fallback),
            provider,
            lrclib_url: cfg.lookup.lrclib_url,
            token,
        })
    }

    pub fn build_provider(&self) -> Result<Provider, FetchError> {
        let provider = match self.provider {
            ProviderKind::Lrclib => LrclibClient::new(&self.lrclib_url).map(Provider::Lrclib),
            ProviderKind::Spotify => {
                let token = self.token.as_deref().unwrap_or_default();
                SpotifyClient::new(token).map(Provider::Spotify)
            }
        };
        provider.map_err(|e| FetchError::Config(format!("{:#}", e)))
    }
}

pub fn home_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|b| b.home_dir().to_path_buf())
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    let proj =
        ProjectDirs::from("", "", "fetch-lyrics").context("ProjectDirs unavailable")?;
    Ok(proj.config_dir().join("config.toml"))
}

/// Load the config file. A missing file yields the defaults.
pub fn load(override_path: Option<&Path>) -> anyhow::Result<Config> {
    let path = match override_path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };

    if !path.exists() {
        return Ok(Config::default());
    }

    let raw = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let cfg = toml::from_str::<Config>(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
