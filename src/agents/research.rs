use std::sync::Arc;

use super::{run_task, TaskOutput};
use crate::providers::base::Provider;

const SYSTEM_PROMPT: &str = "You are a research agent. Your role is to gather and provide \
relevant information about a given topic. Focus on finding key facts and data points. \
Be concise and accurate.";

pub struct ResearchAgent {
    provider: Arc<dyn Provider>,
}

impl ResearchAgent {
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self { provider }
    }

    pub fn research(&self, query: &str) -> TaskOutput {
        run_task(self.provider.as_ref(), SYSTEM_PROMPT, query.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::message::Role;
    use crate::providers::mock::MockProvider;

    #[test]
    fn test_research_sends_query_as_user_message() {
        let mock = Arc::new(MockProvider::new(vec!["findings"]));
        let agent = ResearchAgent::new(mock.clone());

        let output = agent.research("rust adoption in embedded");
        assert!(output.ok);
        assert_eq!(output.text, "findings");

        let calls = mock.recorded();
        assert_eq!(calls[0][1].content, "rust adoption in embedded");
        assert!(matches!(calls[0][0].role, Role::System));
    }
}
