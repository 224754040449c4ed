use std::fmt::Write as _;
use std::sync::Arc;

use super::{run_task, TaskOutput};
use crate::providers::base::Provider;
use crate::reddit::types::SubredditInfo;

const SYSTEM_PROMPT: &str = "You are a specialized agent for discovering and analyzing \
relevant subreddits. Your role is to:\n\
1. Analyze subreddit descriptions and determine relevance to the user's interests\n\
2. Rank subreddits by relevance and quality\n\
3. Provide brief explanations of why each subreddit is relevant\n\
4. Filter out inappropriate or off-topic communities\n\
Be thorough in your analysis and focus on finding the most relevant communities.";

pub struct SubredditDiscoveryAgent {
    provider: Arc<dyn Provider>,
}

impl SubredditDiscoveryAgent {
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self { provider }
    }

    /// Generate search terms for finding subreddits around a topic. The reply
    /// is parsed as one term per line; blank lines are dropped. A term
    /// containing a literal newline cannot survive this format.
    pub fn suggest_search_terms(&self, topic: &str) -> Vec<String> {
        let prompt = format!(
            "Given the topic '{topic}', suggest 5-7 relevant search terms that would help \
             find related subreddits. Consider different aspects and variations of the \
             topic. Return only the search terms, one per line."
        );
        let output = run_task(self.provider.as_ref(), SYSTEM_PROMPT, prompt);

        output
            .text
            .lines()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(String::from)
            .collect()
    }

    /// Rank candidate subreddits by relevance to the topic
    pub fn analyze_subreddits(&self, topic: &str, subreddits: &[SubredditInfo]) -> TaskOutput {
        let mut formatted = String::new();
        for sub in subreddits {
            let _ = writeln!(formatted, "r/{}: {}", sub.name, sub.title);
            let _ = writeln!(formatted, "Description: {}", sub.description);
            let _ = writeln!(formatted, "Subscribers: {}", sub.subscribers);
        }

        let prompt = format!(
            "Based on the user's interest in '{topic}', analyze these subreddits and rank \
             them by relevance:\n\
             \n\
             {formatted}\n\
             Please structure your analysis as follows:\n\
             1. Most Relevant Communities (ordered by relevance)\n\
             2. Why These Communities Are Relevant\n\
             3. Additional Recommendations\n\
             4. Communities to Avoid (if any)"
        );
        run_task(self.provider.as_ref(), SYSTEM_PROMPT, prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::mock::MockProvider;

    fn subreddit(name: &str) -> SubredditInfo {
        SubredditInfo {
            name: name.to_string(),
            title: format!("{name} community"),
            description: format!("all about {name}"),
            subscribers: 1234,
            created_utc: 1_600_000_000.0,
            over18: false,
            url: format!("https://reddit.com/r/{name}/"),
        }
    }

    #[test]
    fn test_suggest_search_terms_splits_lines_and_drops_blanks() {
        let mock = Arc::new(MockProvider::new(vec!["a\nb\n\nc\n"]));
        let agent = SubredditDiscoveryAgent::new(mock);

        let terms = agent.suggest_search_terms("home coffee roasting");
        assert_eq!(terms, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_suggest_search_terms_trims_whitespace() {
        let mock = Arc::new(MockProvider::new(vec!["  espresso  \n\t\nlatte art"]));
        let agent = SubredditDiscoveryAgent::new(mock);

        let terms = agent.suggest_search_terms("coffee");
        assert_eq!(terms, vec!["espresso", "latte art"]);
    }

    #[test]
    fn test_suggest_search_terms_empty_on_failure() {
        let agent = SubredditDiscoveryAgent::new(Arc::new(MockProvider::failing()));
        assert!(agent.suggest_search_terms("coffee").is_empty());
    }

    #[test]
    fn test_analyze_subreddits_formats_descriptors() {
        let mock = Arc::new(MockProvider::new(vec!["ranked"]));
        let agent = SubredditDiscoveryAgent::new(mock.clone());

        let subs = vec![subreddit("espresso"), subreddit("roasting")];
        let output = agent.analyze_subreddits("coffee", &subs);
        assert!(output.ok);

        let prompt = &mock.recorded()[0][1].content;
        assert!(prompt.contains("r/espresso: espresso community"));
        assert!(prompt.contains("Description: all about roasting"));
        assert!(prompt.contains("Subscribers: 1234"));
        assert!(prompt.contains("1. Most Relevant Communities (ordered by relevance)"));
    }
}
