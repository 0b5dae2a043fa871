use crate::config::Settings;
use crate::core::options::QueryOptions;
use crate::core::transport::{MessageStream, SubprocessTransport, Transport};
use crate::error::Result;
use std::sync::Arc;

/// Entry point for running prompts against the agent runtime.
#[derive(Clone)]
pub struct AgentClient {
    transport: Arc<dyn Transport>,
}

impl AgentClient {
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Client that launches the agent CLI named in `settings`.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            SubprocessTransport::new(&settings.agent.cli_path)
                .with_buffer_size(settings.agent.channel_buffer_size),
        )
    }

    pub async fn query(
        &self,
        prompt: impl Into<String>,
        options: &QueryOptions,
    ) -> Result<MessageStream> {
        let prompt = prompt.into();
        tracing::info!(
            model = options.model.as_deref().unwrap_or("default"),
            max_turns = ?options.max_turns,
            agents = options.agents.len(),
            "Starting agent query"
        );
        self.transport.connect(&prompt, options).await
    }
}
