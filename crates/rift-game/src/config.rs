use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use rift_engine::logging::LoggingConfig;
use rift_engine::render::MissingAssetPolicy;

/// Startup settings for the `rift` binary.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Shuffle seed; `None` seeds from the system clock.
    pub seed: Option<u64>,
    pub missing_assets: MissingAssetPolicy,
    /// Directory holding an `atlas.png` that replaces the built-in atlas.
    pub assets_dir: Option<PathBuf>,
    /// Initial window size as a multiple of the logical screen.
    pub window_scale: u32,
    pub logging: LoggingConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            missing_assets: MissingAssetPolicy::Placeholder,
            assets_dir: None,
            window_scale: 3,
            logging: LoggingConfig::default(),
        }
    }
}

impl GameConfig {
    /// Reads `RIFT_SEED`, `RIFT_MISSING_ASSETS`, `RIFT_ASSETS`, `RIFT_SCALE`
    /// and `RIFT_LOG`; unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup("RIFT_SEED") {
            let seed = raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("RIFT_SEED must be an unsigned integer, got {raw:?}"))?;
            config.seed = Some(seed);
        }

        if let Some(raw) = lookup("RIFT_MISSING_ASSETS") {
            config.missing_assets = parse_policy(&raw).context("invalid RIFT_MISSING_ASSETS")?;
        }

        if let Some(raw) = lookup("RIFT_ASSETS") {
            if !raw.trim().is_empty() {
                config.assets_dir = Some(PathBuf::from(raw.trim()));
            }
        }

        if let Some(raw) = lookup("RIFT_SCALE") {
            let scale = raw
                .trim()
                .parse::<u32>()
                .with_context(|| format!("RIFT_SCALE must be a positive integer, got {raw:?}"))?;
            if scale == 0 {
                bail!("RIFT_SCALE must be at least 1");
            }
            config.window_scale = scale;
        }

        if let Some(raw) = lookup("RIFT_LOG") {
            config.logging = LoggingConfig::with_filter(raw);
        }

        Ok(config)
    }
}

fn parse_policy(raw: &str) -> Result<MissingAssetPolicy> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "fail" => Ok(MissingAssetPolicy::Fail),
        "placeholder" => Ok(MissingAssetPolicy::Placeholder),
        other => bail!("expected \"fail\" or \"placeholder\", got {other:?}"),
    }
}
