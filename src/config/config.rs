use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

use crate::session::WaitOptions;

pub const SETTINGS_FILE: &str = "Settings.toml";

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/95.0.4638.54 Safari/537.36";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub target: TargetConfig,
    pub output: OutputConfig,
    pub driver: DriverConfig,
    pub scrape: ScrapeConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TargetConfig {
    pub product_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub product_dir: PathBuf,
    pub reviews_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DriverConfig {
    pub path: PathBuf,
    pub port: u16,
    pub startup_grace_ms: u64,
    pub user_agent: String,
    pub headless: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeConfig {
    pub wait_timeout_secs: u64,
    pub poll_interval_ms: u64,
    pub delay_min_ms: u64,
    pub delay_max_ms: u64,
    pub collect_reviews: bool,
}

impl ScrapeConfig {
    pub fn wait_options(&self) -> WaitOptions {
        WaitOptions {
            timeout: Duration::from_secs(self.wait_timeout_secs),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
        }
    }
}

impl DriverConfig {
    pub fn startup_grace(&self) -> Duration {
        Duration::from_millis(self.startup_grace_ms)
    }
}

fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    Config::builder()
        .set_default(
            "target.product_url",
            "https://us.feelunique.com/p/Paulas-Choice-Resist-Perfectly-Balanced-Foaming-Cleanser-190ml",
        )?
        .set_default("output.product_dir", "products")?
        .set_default("output.reviews_dir", "reviews")?
        .set_default("driver.path", "./chromedriver")?
        .set_default("driver.port", 9515)?
        .set_default("driver.startup_grace_ms", 2000)?
        .set_default("driver.user_agent", DEFAULT_USER_AGENT)?
        .set_default("driver.headless", true)?
        .set_default("scrape.wait_timeout_secs", 10)?
        .set_default("scrape.poll_interval_ms", 250)?
        .set_default("scrape.delay_min_ms", 1000)?
        .set_default("scrape.delay_max_ms", 5000)?
        .set_default("scrape.collect_reviews", true)
}

/// Loads `Settings.toml` (optional) over the built-in defaults, then applies
/// `APP__SECTION__KEY` environment overrides.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = builder()?
        .add_source(File::new(SETTINGS_FILE, FileFormat::Toml).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    settings.try_deserialize::<AppConfig>()
}

/// Same layering as [`load_config`] but from an in-memory TOML document
/// instead of the settings file. Environment overrides are not applied.
pub fn load_config_from_str(toml: &str) -> Result<AppConfig, ConfigError> {
    let settings = builder()?
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?;

    settings.try_deserialize::<AppConfig>()
}
