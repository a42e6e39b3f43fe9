use knight_domain::Stimulus;
use log::warn;

#[allow(async_fn_in_trait)]
pub trait SettingsService {
    async fn get_settings(&self) -> Result<Settings, String>;
    async fn set_settings(&self, settings: Settings) -> Result<(), String>;
}

#[allow(async_fn_in_trait)]
pub trait SettingsRepository {
    async fn read_settings(&self) -> Result<Settings, String>;
    async fn write_settings(&self, settings: Settings) -> Result<(), String>;
}

/// User adjustable configuration. Missing fields take their default value.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Minimum auxiliary involvement in percent for a muscle to count as trained.
    pub auxiliary_threshold: u32,
    pub autosave_delay_ms: u32,
    pub catalog_url: String,
}

impl Settings {
    #[must_use]
    pub fn threshold(&self) -> Stimulus {
        Stimulus::new(self.auxiliary_threshold).unwrap_or_else(|err| {
            warn!("invalid auxiliary threshold: {err}");
            Stimulus::AUXILIARY_THRESHOLD
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auxiliary_threshold: *Stimulus::AUXILIARY_THRESHOLD,
            autosave_delay_ms: 2000,
            catalog_url: String::from("api/exercises"),
        }
    }
}
