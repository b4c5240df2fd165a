use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

/// Smallest allowed vertical axis step. Writes below this are clamped up.
pub const MIN_CHART_STEP: f64 = 0.1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserSettings {
    target_steps: u32,
    chart_step: f64,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            target_steps: 0,
            chart_step: 0.5,
        }
    }
}

/// Durable store for the two user preferences: the daily step goal and the
/// chart axis step. Backed by a JSON file; a missing or corrupt file yields
/// the defaults.
pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn target_steps(&self) -> u32 {
        self.data.read().unwrap().target_steps
    }

    pub fn set_target_steps(&self, steps: u32) -> Result<()> {
        let mut guard = self.data.write().unwrap();
        guard.target_steps = steps;
        self.persist(&guard)
    }

    pub fn chart_step(&self) -> f64 {
        self.data.read().unwrap().chart_step
    }

    pub fn set_chart_step(&self, step: f64) -> Result<()> {
        let mut guard = self.data.write().unwrap();
        guard.chart_step = step.max(MIN_CHART_STEP);
        self.persist(&guard)
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }

    pub fn reload(&self) -> Result<()> {
        let contents = fs::read_to_string(&self.path)?;
        let data: UserSettings = serde_json::from_str(&contents)?;
        let mut guard = self.data.write().unwrap();
        *guard = data;
        Ok(())
    }
}
