use std::fmt::Write as _;
use std::sync::Arc;

use super::{run_task, TaskOutput};
use crate::providers::base::Provider;

const SYSTEM_PROMPT: &str = "You are a specialized agent for analyzing Reddit comments. \
Your role is to:\n\
1. Identify common complaints, problems, and pain points\n\
2. Group similar issues together\n\
3. Determine the frequency and severity of each problem\n\
4. Extract any relevant context or user sentiment\n\
Be thorough in your analysis and format the output as a structured summary.";

pub struct RedditAnalyzerAgent {
    provider: Arc<dyn Provider>,
}

impl RedditAnalyzerAgent {
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self { provider }
    }

    /// Ask for a structured complaint breakdown over a batch of comments
    pub fn analyze_comments(&self, comments: &[String]) -> TaskOutput {
        let mut formatted = String::new();
        for (i, comment) in comments.iter().enumerate() {
            if i > 0 {
                formatted.push('\n');
            }
            let _ = write!(formatted, "Comment {}: {}", i + 1, comment);
        }

        let prompt = format!(
            "Analyze the following Reddit comments and identify common complaints, \
             problems, and user pain points. Group similar issues together and note their \
             frequency:\n\
             \n\
             {formatted}\n\
             \n\
             Please structure your analysis as follows:\n\
             1. Main Issues Identified (ordered by frequency)\n\
             2. User Sentiment Analysis\n\
             3. Context and Contributing Factors\n\
             4. Notable Quotes or Examples"
        );
        run_task(self.provider.as_ref(), SYSTEM_PROMPT, prompt)
    }

    /// Boil an analysis down to the top handful of problems
    pub fn summarize_findings(&self, analysis: &str) -> TaskOutput {
        let prompt = format!(
            "{analysis}\n\
             \n\
             Based on the analysis, provide a concise summary of the top 3-5 most \
             significant problems users are facing, including any patterns in user \
             behavior or sentiment."
        );
        run_task(self.provider.as_ref(), SYSTEM_PROMPT, prompt)
    }
}
