use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::core::options::PermissionMode;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub agent: AgentConfig,
    pub single: SingleAgentConfig,
    pub multi: MultiAgentConfig,
    pub logging: LoggingConfig,
}

/// How the agent CLI is launched, shared by both research modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub cli_path: PathBuf,
    pub permission_mode: PermissionMode,
    pub plugin_dirs: Vec<PathBuf>,
    pub channel_buffer_size: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            cli_path: PathBuf::from("claude"),
            permission_mode: PermissionMode::BypassPermissions,
            plugin_dirs: Vec::new(),
            channel_buffer_size: 64,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SingleAgentConfig {
    pub model: String,
    pub max_turns: u32,
    pub max_searches: u32,
    pub tools: Vec<String>,
}

impl Default for SingleAgentConfig {
    fn default() -> Self {
        Self {
            model: "haiku".to_string(),
            max_turns: 10,
            max_searches: 3,
            tools: vec!["WebSearch".to_string(), "Bash".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiAgentConfig {
    pub model: String,
    pub max_turns: u32,
    pub allowed_tools: Vec<String>,
    pub researcher_model: String,
    pub researcher_tools: Vec<String>,
    pub max_searches: u32,
}

impl Default for MultiAgentConfig {
    fn default() -> Self {
        Self {
            model: "sonnet".to_string(),
            max_turns: 15,
            // Task is what lets the orchestrator reach its sub-agents
            allowed_tools: vec!["Bash".to_string(), "Task".to_string()],
            researcher_model: "haiku".to_string(),
            researcher_tools: vec!["WebSearch".to_string()],
            max_searches: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config_env = env::var("CONFIG_ENV").unwrap_or_else(|_| "default".to_string());

        let config = Config::builder()
            .add_source(File::with_name(&format!("config/{}", config_env)).required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
