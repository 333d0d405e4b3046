use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub energy: EnergyConfig,
    #[serde(default)]
    pub optimizer: OptimizerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    #[serde(default = "default_state")]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergyConfig {
    /// Flat $/kWh rate. Unset means "use the state average".
    #[serde(default)]
    pub electricity_rate: Option<f64>,
    #[serde(default = "default_current_runtime")]
    pub current_daily_runtime: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizerConfig {
    #[serde(default = "default_max_recommendations")]
    pub max_recommendations: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub electricity_rate: Option<f64>,
}

impl Config {
    pub fn default_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config/pump-oracle/config.toml")
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(Self::default_path);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("failed reading config: {}", path.display()))?;
        let parsed: Self = toml::from_str(&data)
            .with_context(|| format!("failed parsing TOML config: {}", path.display()))?;
        Ok(parsed)
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(state) = overrides.state {
            self.location.state = state;
        }
        if let Some(zip_code) = overrides.zip_code {
            self.location.zip_code = zip_code;
        }
        if let Some(rate) = overrides.electricity_rate {
            self.energy.electricity_rate = Some(rate);
        }
    }

    pub fn write_template(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed creating config directory: {}", parent.display())
            })?;
        }
        fs::write(path, Self::default_template())
            .with_context(|| format!("failed writing config template: {}", path.display()))
    }

    pub fn default_template() -> String {
        let template = r#"[location]
state = "FL"
zip_code = ""

[energy]
# electricity_rate = 0.14
current_daily_runtime = 12.0

[optimizer]
max_recommendations = 5
"#;
        template.to_string()
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            state: default_state(),
            zip_code: String::new(),
        }
    }
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            electricity_rate: None,
            current_daily_runtime: default_current_runtime(),
        }
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_recommendations: default_max_recommendations(),
        }
    }
}

fn default_state() -> String {
    "FL".to_string()
}

fn default_current_runtime() -> f64 {
    12.0
}

fn default_max_recommendations() -> usize {
    5
}
