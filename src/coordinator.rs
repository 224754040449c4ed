//! The composition root: owns one instance of each agent plus the Reddit
//! client, and threads data through the fixed pipelines in program order.
//! LLM stages are fail-soft (a failed call degrades to empty text and the
//! pipeline keeps going); data-gathering stages are fail-fast (a pipeline
//! without input data is meaningless).
use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::agents::{
    AnalystAgent, RedditAnalyzerAgent, ResearchAgent, SubredditDiscoveryAgent, TaskOutput,
    WriterAgent,
};
use crate::providers::base::Provider;
use crate::reddit::{RedditClient, SubredditInfo, TimeWindow};

/// Result of the complaint-analysis pipeline. Every stage field is always
/// populated; `TaskOutput::ok` distinguishes a genuine empty reply from a
/// failed backend call.
#[derive(Debug)]
pub struct ComplaintAnalysis {
    pub raw_comments: Vec<String>,
    pub detailed_analysis: TaskOutput,
    pub summary: TaskOutput,
    pub insights: TaskOutput,
    pub final_report: TaskOutput,
}

/// Result of the subreddit-discovery pipeline
#[derive(Debug)]
pub struct DiscoveryReport {
    pub search_terms_used: Vec<String>,
    pub subreddits_found: Vec<SubredditInfo>,
    pub analysis: TaskOutput,
    pub insights: TaskOutput,
    pub final_report: TaskOutput,
}

/// Result of the research chain
#[derive(Debug)]
pub struct ResearchReport {
    pub findings: TaskOutput,
    pub analysis: TaskOutput,
    pub final_report: TaskOutput,
}

pub struct Coordinator {
    researcher: ResearchAgent,
    analyst: AnalystAgent,
    writer: WriterAgent,
    reddit_analyzer: RedditAnalyzerAgent,
    discovery: SubredditDiscoveryAgent,
    reddit: RedditClient,
}

impl Coordinator {
    pub fn new(provider: Arc<dyn Provider>, reddit: RedditClient) -> Self {
        Self {
            researcher: ResearchAgent::new(provider.clone()),
            analyst: AnalystAgent::new(provider.clone()),
            writer: WriterAgent::new(provider.clone()),
            reddit_analyzer: RedditAnalyzerAgent::new(provider.clone()),
            discovery: SubredditDiscoveryAgent::new(provider),
            reddit,
        }
    }

    /// Analyze complaints and problems voiced in a subreddit
    pub fn analyze_reddit_complaints(
        &self,
        subreddit: &str,
        search_query: Option<&str>,
        window: TimeWindow,
        limit: usize,
    ) -> Result<ComplaintAnalysis> {
        // Step 1: Gather comments
        let comments = match search_query {
            Some(query) => self.reddit.search_comments(subreddit, query, limit)?,
            None => self.reddit.top_comments(subreddit, window, limit)?,
        };
        info!("gathered {} comments from r/{subreddit}", comments.len());

        // Step 2: Analyze comments for complaints and problems
        let analysis = self.reddit_analyzer.analyze_comments(&comments);

        // Step 3: Generate summary
        let summary = self.reddit_analyzer.summarize_findings(&analysis.text);

        // Step 4: Get additional insights from the analyst
        let insights = self.analyst.analyze(&format!(
            "Based on this analysis and summary of Reddit comments:\n\
             \n\
             Analysis: {}\n\
             \n\
             Summary: {}\n\
             \n\
             What additional patterns or insights can you identify?",
            analysis.text, summary.text
        ));

        // Step 5: Generate final report
        let final_report = self.writer.write(
            &format!(
                "Reddit Analysis: {}\nSummary: {}",
                analysis.text, summary.text
            ),
            &insights.text,
        );

        Ok(ComplaintAnalysis {
            raw_comments: comments,
            detailed_analysis: analysis,
            summary,
            insights,
            final_report,
        })
    }

    /// Find and analyze relevant subreddits for a given topic
    pub fn discover_subreddits(&self, topic: &str, limit: usize) -> Result<DiscoveryReport> {
        let search_terms = self.discovery.suggest_search_terms(topic);
        info!("searching subreddits with {} terms", search_terms.len());

        // Accumulate per-term results, deduplicated by name; the first
        // occurrence wins so ordering follows term order, then result order
        let mut all_subreddits = Vec::new();
        let mut seen = HashSet::new();
        for term in &search_terms {
            let results = self.reddit.search_subreddits(term, limit)?;
            for sub in results {
                if seen.insert(sub.name.clone()) {
                    all_subreddits.push(sub);
                }
            }
        }

        let analysis = self.discovery.analyze_subreddits(topic, &all_subreddits);

        let insights = self.analyst.analyze(&format!(
            "Based on this analysis of subreddits related to '{topic}':\n\
             \n\
             {}\n\
             \n\
             What additional patterns or insights can you identify about these communities?",
            analysis.text
        ));

        let final_report = self.writer.write(
            &format!("Subreddit Discovery Analysis: {}", analysis.text),
            &insights.text,
        );

        Ok(DiscoveryReport {
            search_terms_used: search_terms,
            subreddits_found: all_subreddits,
            analysis,
            insights,
            final_report,
        })
    }

    /// Research a topic and turn the findings into a written report. Purely
    /// LLM-driven, so every stage is fail-soft and the chain is infallible.
    pub fn research_topic(&self, query: &str) -> ResearchReport {
        let findings = self.researcher.research(query);
        let analysis = self.analyst.analyze(&findings.text);
        let final_report = self.writer.write(&findings.text, &analysis.text);

        ResearchReport {
            findings,
            analysis,
            final_report,
        }
    }
}
