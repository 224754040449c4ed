//! Role-specialized agents. Each agent pairs a fixed system instruction with
//! one or more task methods that format a prompt, send a fresh two-message
//! conversation to the shared provider, and hand back the reply.
pub mod analyst;
pub mod discovery;
pub mod reddit_analyzer;
pub mod research;
pub mod writer;

pub use analyst::AnalystAgent;
pub use discovery::SubredditDiscoveryAgent;
pub use reddit_analyzer::RedditAnalyzerAgent;
pub use research::ResearchAgent;
pub use writer::WriterAgent;

use tracing::warn;

use crate::models::message::Message;
use crate::providers::base::Provider;

/// Outcome of a single agent task. A failed backend call degrades to empty
/// text rather than aborting the pipeline; `ok` records which case happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOutput {
    pub text: String,
    pub ok: bool,
}

impl TaskOutput {
    pub fn completed(text: String) -> Self {
        Self { text, ok: true }
    }

    pub fn failed() -> Self {
        Self {
            text: String::new(),
            ok: false,
        }
    }
}

/// Send `[system, user]` to the provider, absorbing backend failures
pub(crate) fn run_task(provider: &dyn Provider, system: &str, prompt: String) -> TaskOutput {
    let messages = [Message::system(system), Message::user(prompt)];
    match provider.complete(&messages) {
        Ok(text) => TaskOutput::completed(text),
        Err(e) => {
            warn!("Error calling LLM: {e}");
            TaskOutput::failed()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::message::Role;
    use crate::providers::mock::MockProvider;

    #[test]
    fn test_run_task_builds_two_message_conversation() {
        let provider = MockProvider::new(vec!["reply"]);
        let output = run_task(&provider, "be terse", "question".to_string());

        assert_eq!(output, TaskOutput::completed("reply".to_string()));

        let calls = provider.recorded();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].len(), 2);
        assert!(matches!(calls[0][0].role, Role::System));
        assert_eq!(calls[0][0].content, "be terse");
        assert!(matches!(calls[0][1].role, Role::User));
        assert_eq!(calls[0][1].content, "question");
    }

    #[test]
    fn test_run_task_absorbs_backend_failure() {
        let provider = MockProvider::failing();
        let output = run_task(&provider, "sys", "prompt".to_string());
        assert_eq!(output, TaskOutput::failed());
        assert!(output.text.is_empty());
    }
}
