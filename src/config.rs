// Host configuration read from the environment, plus logger setup.
// The poster itself (palette, layout) is compiled in; only runtime knobs live here.

use std::sync::Once;

use crate::error::Error;
use crate::noise;

pub const ENV_NOISE_SEED: &str = "POSTER_NOISE_SEED";
pub const ENV_FPS: &str = "POSTER_FPS";
pub const ENV_LOG: &str = "POSTER_LOG";

const DEFAULT_FPS: usize = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub noise_seed: u32,
    pub target_fps: usize,
    /// env_logger filter syntax, e.g. "info" or "utelamnande_poster=debug".
    pub log_filter: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            noise_seed: noise::DEFAULT_SEED,
            target_fps: DEFAULT_FPS,
            log_filter: None,
        }
    }
}

impl AppConfig {
    /// Read `POSTER_*` variables from the process environment.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, with the variable source injected.
    /// `POSTER_LOG` falls back to `RUST_LOG`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(raw) = lookup(ENV_NOISE_SEED) {
            cfg.noise_seed = parse_seed(&raw)?;
        }
        if let Some(raw) = lookup(ENV_FPS) {
            cfg.target_fps = match raw.trim().parse::<usize>() {
                Ok(fps) if fps > 0 => fps,
                _ => return Err(Error::Config(format!("{ENV_FPS}: expected a positive integer, got {raw:?}"))),
            };
        }
        let non_blank = |f: &String| !f.trim().is_empty();
        cfg.log_filter = lookup(ENV_LOG)
            .filter(non_blank)
            .or_else(|| lookup("RUST_LOG").filter(non_blank));

        Ok(cfg)
    }
}

/// Decimal or 0x-prefixed hex; underscores allowed as separators.
fn parse_seed(raw: &str) -> Result<u32, Error> {
    let cleaned: String = raw.trim().chars().filter(|&c| c != '_').collect();
    let parsed = match cleaned.strip_prefix("0x").or_else(|| cleaned.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => cleaned.parse::<u32>(),
    };
    parsed.map_err(|e| Error::Config(format!("{ENV_NOISE_SEED}: {raw:?} is not a u32 seed ({e})")))
}

static LOG_INIT: Once = Once::new();

/// Install the env_logger backend once; later calls are ignored.
/// Without a filter the level is `info`.
pub fn init_logging(filter: Option<&str>) {
    LOG_INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        match filter {
            Some(f) => {
                builder.parse_filters(f);
            }
            None => {
                builder.filter_level(log::LevelFilter::Info);
            }
        }
        builder.format_timestamp_millis();
        // A test harness may have installed a logger already; that is fine.
        let _ = builder.try_init();
        log::debug!("logging initialized");
    });
}
