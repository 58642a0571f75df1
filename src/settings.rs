//! Game settings and the settings panel
//!
//! Settings are persisted as part of the saved game (see `persistence`), using
//! the same camelCase keys the page has always written.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Direction the cards must be sorted in to win
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum WinningMode {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl WinningMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WinningMode::Ascending => "asc",
            WinningMode::Descending => "desc",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Some(WinningMode::Ascending),
            "desc" | "descending" => Some(WinningMode::Descending),
            _ => None,
        }
    }

    /// Human-readable label for the settings form
    pub fn label(&self) -> &'static str {
        match self {
            WinningMode::Ascending => "Ascending",
            WinningMode::Descending => "Descending",
        }
    }

    /// Whether two neighbouring values respect this order (ties allowed)
    pub fn in_order(&self, left: u32, right: u32) -> bool {
        match self {
            WinningMode::Ascending => left <= right,
            WinningMode::Descending => left >= right,
        }
    }
}

/// Settings for one container on the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerSettings {
    /// Number of cards dealt
    #[serde(alias = "cardCount")]
    pub cards: usize,
    /// Smallest card value
    pub min_range: u32,
    /// Largest card value
    pub max_range: u32,
    /// Required order
    #[serde(alias = "mode", default)]
    pub winning_mode: WinningMode,
}

impl Default for ContainerSettings {
    fn default() -> Self {
        Self {
            cards: DEFAULT_TOTAL_CARDS,
            min_range: DEFAULT_MIN_RANGE,
            max_range: DEFAULT_MAX_RANGE,
            winning_mode: WinningMode::Ascending,
        }
    }
}

impl ContainerSettings {
    pub fn new(cards: usize, min_range: u32, max_range: u32, winning_mode: WinningMode) -> Self {
        Self {
            cards,
            min_range,
            max_range,
            winning_mode,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_CARDS..=MAX_CARDS).contains(&self.cards) {
            return Err(ConfigError::CardCount { count: self.cards });
        }
        if self.min_range > self.max_range {
            return Err(ConfigError::InvertedRange {
                min: self.min_range,
                max: self.max_range,
            });
        }
        Ok(())
    }
}

/// Full game configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// How many of `containers` are in play
    #[serde(alias = "containerCount")]
    pub number_of_containers: usize,
    /// Per-container settings; entries past `number_of_containers` are kept so
    /// the form remembers them
    pub containers: Vec<ContainerSettings>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            number_of_containers: 1,
            containers: vec![ContainerSettings::default()],
        }
    }
}

impl Settings {
    pub fn new(containers: Vec<ContainerSettings>) -> Self {
        Self {
            number_of_containers: containers.len(),
            containers,
        }
    }

    /// Check every in-play container and the container count
    pub fn validate(&self) -> Result<(), ConfigError> {
        let available = self.containers.len();
        if self.number_of_containers == 0 || self.number_of_containers > available {
            return Err(ConfigError::ContainerCount {
                requested: self.number_of_containers,
                available,
            });
        }
        for container in self.active() {
            container.validate()?;
        }
        Ok(())
    }

    /// The containers currently in play
    pub fn active(&self) -> &[ContainerSettings] {
        let n = self.number_of_containers.min(self.containers.len());
        &self.containers[..n]
    }

    /// Change the container count, padding with defaults so the form always
    /// has an entry to edit
    pub fn resize(&mut self, count: usize) {
        while self.containers.len() < count {
            self.containers.push(ContainerSettings::default());
        }
        self.number_of_containers = count;
    }
}

/// Model behind the settings side panel
///
/// Edits go to a draft; `apply` validates the draft and only then replaces the
/// live settings, so a rejected edit leaves the previous settings in force.
#[derive(Debug, Clone, Default)]
pub struct SettingsPanel {
    current: Settings,
    draft: Settings,
    open: bool,
}

impl SettingsPanel {
    pub fn new(settings: Settings) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self {
            draft: settings.clone(),
            current: settings,
            open: false,
        })
    }

    /// Live (last applied) settings
    pub fn settings(&self) -> &Settings {
        &self.current
    }

    /// Replace live settings without emitting anything (used on restore)
    pub fn set_settings(&mut self, settings: Settings) -> Result<(), ConfigError> {
        settings.validate()?;
        self.draft = settings.clone();
        self.current = settings;
        Ok(())
    }

    pub fn draft(&self) -> &Settings {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Settings {
        &mut self.draft
    }

    /// Throw away unapplied edits
    pub fn discard_draft(&mut self) {
        self.draft = self.current.clone();
    }

    /// Validate the draft and make it live, returning the applied snapshot
    pub fn apply(&mut self) -> Result<Settings, ConfigError> {
        if let Err(err) = self.draft.validate() {
            log::warn!("Rejected settings: {}", err);
            return Err(err);
        }
        self.current = self.draft.clone();
        log::info!(
            "Settings applied ({} container(s))",
            self.current.number_of_containers
        );
        Ok(self.current.clone())
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Escape closes the panel; returns whether the key was consumed
    pub fn handle_key(&mut self, key: &str) -> bool {
        if key == "Escape" && self.open {
            self.close();
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.number_of_containers, 1);
        assert_eq!(
            settings.containers,
            vec![ContainerSettings::new(5, 0, 100, WinningMode::Ascending)]
        );
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut settings = Settings::default();
        settings.containers[0].cards = 9;
        assert_eq!(settings.validate(), Err(ConfigError::CardCount { count: 9 }));

        settings.containers[0].cards = 0;
        assert_eq!(settings.validate(), Err(ConfigError::CardCount { count: 0 }));

        settings.containers[0].cards = 3;
        settings.containers[0].min_range = 20;
        settings.containers[0].max_range = 10;
        assert_eq!(
            settings.validate(),
            Err(ConfigError::InvertedRange { min: 20, max: 10 })
        );

        settings.containers[0].min_range = 10;
        assert!(settings.validate().is_ok(), "equal bounds are allowed");

        settings.number_of_containers = 2;
        assert_eq!(
            settings.validate(),
            Err(ConfigError::ContainerCount {
                requested: 2,
                available: 1
            })
        );
    }

    #[test]
    fn test_inactive_containers_are_not_validated() {
        let mut settings = Settings::new(vec![
            ContainerSettings::default(),
            ContainerSettings::new(0, 50, 10, WinningMode::Descending),
        ]);
        settings.number_of_containers = 1;
        assert!(settings.validate().is_ok());
        assert_eq!(settings.active().len(), 1);
    }

    #[test]
    fn test_apply_keeps_previous_on_error() {
        let mut panel = SettingsPanel::new(Settings::default()).unwrap();
        panel.draft_mut().containers[0].min_range = 500;
        assert!(panel.apply().is_err());
        assert_eq!(panel.settings(), &Settings::default());

        panel.draft_mut().containers[0].min_range = 5;
        let applied = panel.apply().unwrap();
        assert_eq!(applied.containers[0].min_range, 5);
        assert_eq!(panel.settings().containers[0].min_range, 5);
    }

    #[test]
    fn test_resize_pads_with_defaults() {
        let mut settings = Settings::default();
        settings.resize(3);
        assert_eq!(settings.containers.len(), 3);
        assert_eq!(settings.active().len(), 3);
        settings.resize(1);
        assert_eq!(settings.containers.len(), 3);
        assert_eq!(settings.active().len(), 1);
    }

    #[test]
    fn test_panel_open_close() {
        let mut panel = SettingsPanel::default();
        assert!(!panel.handle_key("Escape"));
        panel.toggle();
        assert!(panel.is_open());
        assert!(!panel.handle_key("Enter"));
        assert!(panel.handle_key("Escape"));
        assert!(!panel.is_open());
    }

    #[test]
    fn test_serde_keys_and_aliases() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert!(json.contains("\"numberOfContainers\":1"));
        assert!(json.contains("\"winningMode\":\"asc\""));

        let parsed: Settings = serde_json::from_str(
            r#"{"containerCount":1,"containers":[{"cardCount":4,"minRange":0,"maxRange":9,"mode":"desc"}]}"#,
        )
        .unwrap();
        assert_eq!(
            parsed.containers[0],
            ContainerSettings::new(4, 0, 9, WinningMode::Descending)
        );
    }

    #[test]
    fn test_winning_mode_parse() {
        assert_eq!(WinningMode::from_str("DESC"), Some(WinningMode::Descending));
        assert_eq!(WinningMode::from_str(" asc "), Some(WinningMode::Ascending));
        assert_eq!(WinningMode::from_str("sideways"), None);
        assert!(WinningMode::Ascending.in_order(3, 3));
        assert!(WinningMode::Descending.in_order(3, 3));
        assert!(!WinningMode::Descending.in_order(1, 3));
    }
}
