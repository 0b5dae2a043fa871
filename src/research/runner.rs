//! Research Runner - drives one research run end to end
//!
//! Information Hiding:
//! - Stream consumption and per-message logging hidden from callers
//! - Summary printing and report-file detection internalized
//! - Exposes `run(plan)` returning a `ResearchOutcome`

use super::log;
use super::plan::{ResearchMode, ResearchOverrides, ResearchPlan};
use super::summary;
use super::ticker::Ticker;
use crate::config::Settings;
use crate::core::client::AgentClient;
use crate::core::messages::{ResultMessage, SdkMessage};
use crate::error::Result;
use crate::utils;
use futures::StreamExt;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ResearchOutcome {
    pub result: Option<ResultMessage>,
    pub report_path: PathBuf,
    pub report_written: bool,
    pub messages_seen: usize,
}

impl ResearchOutcome {
    /// A result arrived and it was not an error result.
    pub fn succeeded(&self) -> bool {
        self.result.as_ref().is_some_and(|r| !r.is_error)
    }
}

pub struct ResearchRunner {
    client: AgentClient,
    settings: Settings,
}

impl ResearchRunner {
    pub fn new(client: AgentClient, settings: Settings) -> Self {
        Self { client, settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn plan(
        &self,
        mode: ResearchMode,
        ticker: &Ticker,
        overrides: &ResearchOverrides,
    ) -> ResearchPlan {
        ResearchPlan::build(mode, ticker, &self.settings, overrides)
    }

    pub async fn run(&self, plan: &ResearchPlan) -> Result<ResearchOutcome> {
        tracing::info!(ticker = %plan.ticker, mode = %plan.mode, "Starting research");

        if plan.mode == ResearchMode::Multi {
            println!("Researching {} with multi-agent pipeline...\n", plan.ticker);
        }

        let mut stream = self.client.query(plan.prompt.clone(), &plan.options).await?;
        let mut result = None;
        let mut messages_seen = 0;

        while let Some(item) = stream.next().await {
            let message = item?;
            messages_seen += 1;

            for line in log::describe(&message) {
                println!("{}", line);
            }

            if let SdkMessage::Result(ref done) = message {
                summary::print(done);
                result = Some(done.clone());
            }
        }

        let report_written = tokio::fs::try_exists(&plan.report_path)
            .await
            .unwrap_or(false);

        if report_written {
            utils::print_success(&format!("Report written to {}", plan.report_path.display()));
        } else {
            tracing::warn!(path = %plan.report_path.display(), "Report file not found after run");
            utils::print_notice(&format!(
                "No report found at {}",
                plan.report_path.display()
            ));
        }

        Ok(ResearchOutcome {
            result,
            report_path: plan.report_path.clone(),
            report_written,
            messages_seen,
        })
    }
}
