//! Query configuration for each research mode
//!
//! Information Hiding:
//! - Per-mode tool sets, models and turn limits come from `Settings`
//! - Sub-agent wiring for the multi-agent pipeline is assembled here
//! - Callers pick a mode and optional overrides, nothing else

use super::prompts;
use super::ticker::Ticker;
use crate::config::Settings;
use crate::core::options::{AgentDefinition, QueryOptions};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResearchMode {
    /// One agent searches and writes the report itself.
    Single,
    /// An orchestrator dispatches news and ratings researchers, then writes the report.
    Multi,
}

impl fmt::Display for ResearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => f.write_str("single-agent"),
            Self::Multi => f.write_str("multi-agent"),
        }
    }
}

/// Command-line overrides layered on top of `Settings`.
#[derive(Debug, Clone, Default)]
pub struct ResearchOverrides {
    pub model: Option<String>,
    pub max_turns: Option<u32>,
    pub cwd: Option<PathBuf>,
    pub plugin_dirs: Vec<PathBuf>,
}

/// Everything needed to start one research run.
#[derive(Debug, Clone)]
pub struct ResearchPlan {
    pub mode: ResearchMode,
    pub ticker: Ticker,
    pub prompt: String,
    pub options: QueryOptions,
    pub report_path: PathBuf,
}

impl ResearchPlan {
    pub fn build(
        mode: ResearchMode,
        ticker: &Ticker,
        settings: &Settings,
        overrides: &ResearchOverrides,
    ) -> Self {
        let cwd = overrides
            .cwd
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

        let (prompt, mut options) = match mode {
            ResearchMode::Single => single_agent(ticker, settings),
            ResearchMode::Multi => multi_agent(ticker, settings),
        };

        options = options
            .cwd(cwd.clone())
            .permission_mode(settings.agent.permission_mode);

        if let Some(ref model) = overrides.model {
            options = options.model(model.clone());
        }
        if let Some(turns) = overrides.max_turns {
            options = options.max_turns(turns);
        }

        let plugin_dirs = if overrides.plugin_dirs.is_empty() {
            &settings.agent.plugin_dirs
        } else {
            &overrides.plugin_dirs
        };
        for dir in plugin_dirs {
            options = options.plugin_dir(dir.clone());
        }

        Self {
            mode,
            ticker: ticker.clone(),
            prompt,
            report_path: cwd.join(ticker.report_file_name()),
            options,
        }
    }
}

fn single_agent(ticker: &Ticker, settings: &Settings) -> (String, QueryOptions) {
    let config = &settings.single;
    let options = QueryOptions::new()
        .tools(config.tools.iter().cloned())
        .max_turns(config.max_turns)
        .model(config.model.clone())
        .system_prompt(prompts::single_agent_system_prompt(ticker, config.max_searches));

    (prompts::single_agent_task(ticker), options)
}

fn multi_agent(ticker: &Ticker, settings: &Settings) -> (String, QueryOptions) {
    let config = &settings.multi;

    let news = AgentDefinition::new(
        prompts::NEWS_RESEARCHER_DESCRIPTION,
        prompts::news_researcher_prompt(config.max_searches),
    )
    .tools(config.researcher_tools.iter().cloned())
    .model(config.researcher_model.clone());

    let ratings = AgentDefinition::new(
        prompts::RATINGS_RESEARCHER_DESCRIPTION,
        prompts::ratings_researcher_prompt(config.max_searches),
    )
    .tools(config.researcher_tools.iter().cloned())
    .model(config.researcher_model.clone());

    let options = QueryOptions::new()
        .max_turns(config.max_turns)
        .model(config.model.clone())
        .system_prompt(prompts::orchestrator_system_prompt(ticker))
        .allowed_tools(config.allowed_tools.iter().cloned())
        .agent(prompts::NEWS_RESEARCHER, news)
        .agent(prompts::RATINGS_RESEARCHER, ratings);

    (prompts::multi_agent_task(ticker), options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::options::PermissionMode;

    fn plan(mode: ResearchMode, overrides: ResearchOverrides) -> ResearchPlan {
        let ticker = Ticker::parse("MSFT").unwrap();
        ResearchPlan::build(mode, &ticker, &Settings::default(), &overrides)
    }

    fn in_tmp() -> ResearchOverrides {
        ResearchOverrides {
            cwd: Some(PathBuf::from("/tmp/research")),
            ..Default::default()
        }
    }

    #[test]
    fn test_single_agent_plan() {
        let plan = plan(ResearchMode::Single, in_tmp());
        let options = &plan.options;

        assert_eq!(options.model.as_deref(), Some("haiku"));
        assert_eq!(options.max_turns, Some(10));
        assert_eq!(
            options.tools.as_deref(),
            Some(&["WebSearch".to_string(), "Bash".to_string()][..])
        );
        assert!(options.allowed_tools.is_empty());
        assert!(options.agents.is_empty());
        assert_eq!(options.permission_mode, Some(PermissionMode::BypassPermissions));
        assert!(options.allow_dangerously_skip_permissions);
        assert_eq!(plan.report_path, PathBuf::from("/tmp/research/MSFT_research_report.md"));
        assert!(plan.prompt.starts_with("Research MSFT"));
    }

    #[test]
    fn test_multi_agent_plan() {
        let plan = plan(ResearchMode::Multi, in_tmp());
        let options = &plan.options;

        assert_eq!(options.model.as_deref(), Some("sonnet"));
        assert_eq!(options.max_turns, Some(15));
        assert!(options.tools.is_none());
        assert_eq!(options.allowed_tools, vec!["Bash", "Task"]);

        let names: Vec<_> = options.agents.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["news-researcher", "ratings-researcher"]);

        for agent in options.agents.values() {
            assert_eq!(agent.model.as_deref(), Some("haiku"));
            assert_eq!(agent.tools.as_deref(), Some(&["WebSearch".to_string()][..]));
        }
    }

    #[test]
    fn test_overrides_replace_settings() {
        let overrides = ResearchOverrides {
            model: Some("opus".to_string()),
            max_turns: Some(3),
            plugin_dirs: vec![PathBuf::from("../../")],
            ..in_tmp()
        };
        let plan = plan(ResearchMode::Multi, overrides);

        assert_eq!(plan.options.model.as_deref(), Some("opus"));
        assert_eq!(plan.options.max_turns, Some(3));
        assert_eq!(plan.options.plugins.len(), 1);
        assert_eq!(plan.options.cwd, Some(PathBuf::from("/tmp/research")));
    }
}
