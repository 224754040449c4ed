use std::sync::Arc;

use super::{run_task, TaskOutput};
use crate::providers::base::Provider;

const SYSTEM_PROMPT: &str = "You are an analysis agent. Your role is to analyze information \
and identify patterns, insights, and conclusions. Be logical and thorough in your analysis.";

pub struct AnalystAgent {
    provider: Arc<dyn Provider>,
}

impl AnalystAgent {
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self { provider }
    }

    pub fn analyze(&self, data: &str) -> TaskOutput {
        let prompt = format!("Analyze the following information: {data}");
        run_task(self.provider.as_ref(), SYSTEM_PROMPT, prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::mock::MockProvider;

    #[test]
    fn test_analyze_embeds_data() {
        let mock = Arc::new(MockProvider::new(vec!["analysis"]));
        let agent = AnalystAgent::new(mock.clone());

        let output = agent.analyze("sales dipped in march");
        assert!(output.ok);
        assert_eq!(output.text, "analysis");

        let calls = mock.recorded();
        assert_eq!(
            calls[0][1].content,
            "Analyze the following information: sales dipped in march"
        );
    }

    #[test]
    fn test_analyze_degrades_on_backend_failure() {
        let agent = AnalystAgent::new(Arc::new(MockProvider::failing()));
        let output = agent.analyze("anything");
        assert!(!output.ok);
        assert!(output.text.is_empty());
    }
}
