// Runtime tunables, optionally overridden by a JSON block in the host page:
// <script type="application/json" id="dashboard-config">{ "stagger_ms": 150 }</script>
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_ELEMENT_ID: &str = "dashboard-config";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid dashboard config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Delay between consecutive suggestion cards.
    pub stagger_ms: u32,
    /// Simulated compute time before the first card.
    pub compute_delay_ms: u32,
    pub notice_ms: u32,
    pub clock_refresh_ms: u32,
    pub weather_refresh_ms: u32,
    pub frame_interval_ms: u32,
    /// Departure hour used until the user picks one.
    pub default_hour: u8,
    pub location_timeout_ms: u32,
    pub watch_max_age_ms: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            stagger_ms: 100,
            compute_delay_ms: 800,
            notice_ms: 3000,
            clock_refresh_ms: 60_000,
            weather_refresh_ms: 300_000,
            frame_interval_ms: 16,
            default_hour: 8,
            location_timeout_ms: 10_000,
            watch_max_age_ms: 30_000,
        }
    }
}

impl DashboardConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let mut cfg: DashboardConfig = serde_json::from_str(raw)?;
        cfg.default_hour = cfg.default_hour.min(23);
        Ok(cfg)
    }

    /// Reads the page's config block; a missing block or a bad one yields defaults.
    pub fn from_document() -> Self {
        let raw = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());
        match raw {
            Some(raw) if !raw.trim().is_empty() => match Self::from_json(&raw) {
                Ok(cfg) => {
                    tracing::info!(?cfg, "loaded dashboard config");
                    cfg
                }
                Err(err) => {
                    tracing::warn!(%err, "falling back to default config");
                    Self::default()
                }
            },
            _ => Self::default(),
        }
    }
}
