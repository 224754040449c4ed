use std::sync::Arc;

use super::{run_task, TaskOutput};
use crate::providers::base::Provider;

const SYSTEM_PROMPT: &str = "You are a writer agent. Your role is to create well-structured, \
engaging content based on provided information and analysis. Focus on clarity and coherence.";

pub struct WriterAgent {
    provider: Arc<dyn Provider>,
}

impl WriterAgent {
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self { provider }
    }

    /// Compose a report from research findings and an analysis of them
    pub fn write(&self, research: &str, analysis: &str) -> TaskOutput {
        let prompt = format!(
            "Based on the following research and analysis, create a well-structured report:\n\
             \n\
             Research: {research}\n\
             \n\
             Analysis: {analysis}"
        );
        run_task(self.provider.as_ref(), SYSTEM_PROMPT, prompt)
    }
}
