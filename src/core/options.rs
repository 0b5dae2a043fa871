//! Query options for the agent CLI
//!
//! Information Hiding:
//! - Command-line flag names and their ordering hidden behind `to_cli_args`
//! - Sub-agent definitions serialized to the JSON shape the CLI expects
//! - Exposes a fluent builder in the style of `AgentBuilder`

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PermissionMode {
    #[default]
    Default,
    AcceptEdits,
    BypassPermissions,
    Plan,
}

impl PermissionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::AcceptEdits => "acceptEdits",
            Self::BypassPermissions => "bypassPermissions",
            Self::Plan => "plan",
        }
    }
}

impl fmt::Display for PermissionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named sub-agent the main agent may dispatch through the Task tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentDefinition {
    pub description: String,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl AgentDefinition {
    pub fn new(description: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            prompt: prompt.into(),
            tools: None,
            model: None,
        }
    }

    pub fn tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tools = Some(tools.into_iter().map(Into::into).collect());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginConfig {
    Local { path: PathBuf },
}

#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    pub cwd: Option<PathBuf>,
    pub model: Option<String>,
    pub system_prompt: Option<String>,
    pub max_turns: Option<u32>,
    /// Restricts the built-in tool set. `None` leaves the CLI default.
    pub tools: Option<Vec<String>>,
    /// Tools that run without a permission prompt.
    pub allowed_tools: Vec<String>,
    pub permission_mode: Option<PermissionMode>,
    pub allow_dangerously_skip_permissions: bool,
    pub agents: BTreeMap<String, AgentDefinition>,
    pub plugins: Vec<PluginConfig>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn max_turns(mut self, turns: u32) -> Self {
        self.max_turns = Some(turns);
        self
    }

    pub fn tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tools = Some(tools.into_iter().map(Into::into).collect());
        self
    }

    pub fn allowed_tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_tools = tools.into_iter().map(Into::into).collect();
        self
    }

    /// Set the permission mode.
    ///
    /// Bypassing permissions is refused by the CLI unless the dangerous-skip
    /// flag is also present, so selecting it here turns that flag on.
    pub fn permission_mode(mut self, mode: PermissionMode) -> Self {
        self.permission_mode = Some(mode);
        if mode == PermissionMode::BypassPermissions {
            self.allow_dangerously_skip_permissions = true;
        }
        self
    }

    pub fn agent(mut self, name: impl Into<String>, definition: AgentDefinition) -> Self {
        self.agents.insert(name.into(), definition);
        self
    }

    pub fn plugin_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.plugins.push(PluginConfig::Local { path: path.into() });
        self
    }

    /// Render the argument vector for a print-mode, stream-json run of `prompt`.
    pub fn to_cli_args(&self, prompt: &str) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "--output-format".into(),
            "stream-json".into(),
            "--verbose".into(),
        ];

        if let Some(ref system_prompt) = self.system_prompt {
            args.push("--system-prompt".into());
            args.push(system_prompt.clone());
        }

        if let Some(ref tools) = self.tools {
            args.push("--tools".into());
            args.push(tools.join(","));
        }

        if !self.allowed_tools.is_empty() {
            args.push("--allowedTools".into());
            args.push(self.allowed_tools.join(","));
        }

        if let Some(turns) = self.max_turns {
            args.push("--max-turns".into());
            args.push(turns.to_string());
        }

        if let Some(ref model) = self.model {
            args.push("--model".into());
            args.push(model.clone());
        }

        if let Some(mode) = self.permission_mode {
            args.push("--permission-mode".into());
            args.push(mode.to_string());
        }

        if self.allow_dangerously_skip_permissions {
            args.push("--allow-dangerously-skip-permissions".into());
        }

        if !self.agents.is_empty() {
            // BTreeMap keys serialize in sorted order
            let agents = serde_json::to_string(&self.agents)
                .unwrap_or_else(|_| "{}".to_string());
            args.push("--agents".into());
            args.push(agents);
        }

        for plugin in &self.plugins {
            match plugin {
                PluginConfig::Local { path } => {
                    args.push("--plugin-dir".into());
                    args.push(path.display().to_string());
                }
            }
        }

        args.push("--print".into());
        args.push("--".into());
        args.push(prompt.to_string());

        args
    }
}
