use std::collections::BTreeSet;
use std::env;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use regex::Regex;
use reqwest::blocking::Client;
use serde_json::Value;
use tracing::debug;

use super::types::{PostInfo, SubredditInfo, TimeWindow};

pub const REDDIT_AUTH_HOST: &str = "https://www.reddit.com";
pub const REDDIT_API_HOST: &str = "https://oauth.reddit.com";

const DEFAULT_USER_AGENT: &str = "magpie/1.0";

// Threads fetched per listing before comment flattening
const THREAD_FETCH_LIMIT: usize = 25;

pub struct RedditConfig {
    pub client_id: String,
    pub client_secret: String,
    pub user_agent: String,
    pub auth_host: String,
    pub api_host: String,
}

impl RedditConfig {
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            client_id,
            client_secret,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            auth_host: REDDIT_AUTH_HOST.to_string(),
            api_host: REDDIT_API_HOST.to_string(),
        }
    }

    pub fn from_env() -> Result<Self> {
        let client_id =
            env::var("REDDIT_CLIENT_ID").context("REDDIT_CLIENT_ID must be set")?;
        let client_secret =
            env::var("REDDIT_CLIENT_SECRET").context("REDDIT_CLIENT_SECRET must be set")?;
        Ok(Self::new(client_id, client_secret))
    }
}

/// Read-only client for the Reddit API. Authenticates with the client
/// credentials grant and caches the bearer token for its own lifetime.
pub struct RedditClient {
    client: Client,
    config: RedditConfig,
    token: Mutex<Option<String>>,
}

impl RedditClient {
    pub fn new(config: RedditConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            config,
            token: Mutex::new(None),
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(RedditConfig::from_env()?)
    }

    /// Fetch comments from a subreddit's top threads in the given window.
    /// Comments shorter than six words are dropped; collection stops at
    /// `limit`, both per thread and overall.
    pub fn top_comments(
        &self,
        subreddit: &str,
        window: TimeWindow,
        limit: usize,
    ) -> Result<Vec<String>> {
        let listing = self.get(
            &format!("/r/{subreddit}/top"),
            &[
                ("t", window.as_str().to_string()),
                ("limit", THREAD_FETCH_LIMIT.to_string()),
            ],
        )?;
        self.collect_comments(subreddit, &listing, limit)
    }

    /// Fetch comments from threads matching `query` within the subreddit,
    /// over a fixed one-month window
    pub fn search_comments(
        &self,
        subreddit: &str,
        query: &str,
        limit: usize,
    ) -> Result<Vec<String>> {
        let listing = self.get(
            &format!("/r/{subreddit}/search"),
            &[
                ("q", query.to_string()),
                ("restrict_sr", "1".to_string()),
                ("t", TimeWindow::Month.as_str().to_string()),
                ("limit", THREAD_FETCH_LIMIT.to_string()),
            ],
        )?;
        self.collect_comments(subreddit, &listing, limit)
    }

    /// Fetch top submissions as post summaries, selftext truncated to 200
    /// characters
    pub fn top_posts(
        &self,
        subreddit: &str,
        window: TimeWindow,
        limit: usize,
    ) -> Result<Vec<PostInfo>> {
        let listing = self.get(
            &format!("/r/{subreddit}/top"),
            &[
                ("t", window.as_str().to_string()),
                ("limit", THREAD_FETCH_LIMIT.to_string()),
            ],
        )?;

        let mut posts = Vec::new();
        for child in listing_children(&listing) {
            let Some(data) = child.get("data") else {
                continue;
            };
            posts.push(PostInfo {
                title: string_field(data, "title"),
                author: string_field(data, "author"),
                score: data.get("score").and_then(Value::as_i64).unwrap_or(0),
                num_comments: data
                    .get("num_comments")
                    .and_then(Value::as_u64)
                    .unwrap_or(0),
                url: string_field(data, "url"),
                content: truncate(&string_field(data, "selftext"), 200),
            });
            if posts.len() >= limit {
                break;
            }
        }
        Ok(posts)
    }

    /// Search for subreddits matching the query
    pub fn search_subreddits(&self, query: &str, limit: usize) -> Result<Vec<SubredditInfo>> {
        let listing = self.get(
            "/subreddits/search",
            &[("q", query.to_string()), ("limit", limit.to_string())],
        )?;

        let mut subreddits = Vec::new();
        for child in listing_children(&listing) {
            let Some(data) = child.get("data") else {
                continue;
            };
            subreddits.push(SubredditInfo {
                name: string_field(data, "display_name"),
                title: string_field(data, "title"),
                description: string_field(data, "public_description"),
                subscribers: data
                    .get("subscribers")
                    .and_then(Value::as_u64)
                    .unwrap_or(0),
                created_utc: data
                    .get("created_utc")
                    .and_then(Value::as_f64)
                    .unwrap_or(0.0),
                over18: data.get("over18").and_then(Value::as_bool).unwrap_or(false),
                url: format!("https://reddit.com{}", string_field(data, "url")),
            });
        }
        Ok(subreddits)
    }

    /// Best-effort mining of a subreddit's sidebar and `related` wiki page
    /// for cross-referenced subreddits. Every failure degrades to whatever
    /// was collected so far; a missing wiki page and a transport error are
    /// treated the same.
    pub fn related_subreddits(&self, subreddit: &str) -> BTreeSet<String> {
        let mut related = BTreeSet::new();

        match self.get(&format!("/r/{subreddit}/about"), &[]) {
            Ok(about) => {
                if let Some(sidebar) = about.pointer("/data/description").and_then(Value::as_str)
                {
                    extract_subreddit_names(sidebar, &mut related);
                }
            }
            Err(e) => {
                debug!("related lookup: about page unavailable for r/{subreddit}: {e}");
                return related;
            }
        }

        match self.get(&format!("/r/{subreddit}/wiki/related"), &[]) {
            Ok(wiki) => {
                if let Some(markdown) = wiki.pointer("/data/content_md").and_then(Value::as_str) {
                    extract_subreddit_names(markdown, &mut related);
                }
            }
            Err(e) => debug!("related lookup: wiki page unavailable for r/{subreddit}: {e}"),
        }

        related
    }

    fn collect_comments(
        &self,
        subreddit: &str,
        listing: &Value,
        limit: usize,
    ) -> Result<Vec<String>> {
        let mut comments = Vec::new();
        for child in listing_children(listing) {
            let Some(id) = child.pointer("/data/id").and_then(Value::as_str) else {
                continue;
            };
            let thread = self.get(
                &format!("/r/{subreddit}/comments/{id}"),
                &[("limit", "100".to_string())],
            )?;

            for body in flatten_comment_bodies(&thread).into_iter().take(limit) {
                if is_substantial(&body) {
                    comments.push(body);
                }
                if comments.len() >= limit {
                    break;
                }
            }
            if comments.len() >= limit {
                break;
            }
        }
        Ok(comments)
    }

    fn access_token(&self) -> Result<String> {
        if let Some(token) = self.token.lock().unwrap().clone() {
            return Ok(token);
        }

        let url = format!(
            "{}/api/v1/access_token",
            self.config.auth_host.trim_end_matches('/')
        );
        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .header(reqwest::header::USER_AGENT, &self.config.user_agent)
            .form(&[("grant_type", "client_credentials")])
            .send()?;

        if !response.status().is_success() {
            return Err(anyhow!("Reddit auth failed: {}", response.status()));
        }

        let body: Value = response.json()?;
        let token = body
            .get("access_token")
            .and_then(Value::as_str)
            .context("no access_token in auth response")?
            .to_string();

        *self.token.lock().unwrap() = Some(token.clone());
        Ok(token)
    }

    fn get(&self, path: &str, params: &[(&str, String)]) -> Result<Value> {
        let token = self.access_token()?;
        let url = format!("{}{}", self.config.api_host.trim_end_matches('/'), path);
        debug!(url = %url, "reddit request");

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .header(reqwest::header::USER_AGENT, &self.config.user_agent)
            .query(params)
            .send()?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "Reddit request failed: {} for {}",
                response.status(),
                path
            ));
        }
        Ok(response.json()?)
    }
}

/// Filter out very short comments
fn is_substantial(body: &str) -> bool {
    body.split_whitespace().count() > 5
}

fn listing_children(listing: &Value) -> Vec<&Value> {
    listing
        .pointer("/data/children")
        .and_then(Value::as_array)
        .map(|children| children.iter().collect())
        .unwrap_or_default()
}

/// Flatten a comment-thread response (`[post listing, comment listing]`)
/// into comment bodies, descending into replies and skipping `more` stubs
fn flatten_comment_bodies(thread: &Value) -> Vec<String> {
    let mut bodies = Vec::new();
    if let Some(comment_listing) = thread.get(1) {
        collect_bodies(comment_listing, &mut bodies);
    }
    bodies
}

fn collect_bodies(listing: &Value, out: &mut Vec<String>) {
    for child in listing_children(listing) {
        if child.get("kind").and_then(Value::as_str) != Some("t1") {
            continue;
        }
        if let Some(body) = child.pointer("/data/body").and_then(Value::as_str) {
            out.push(body.to_string());
        }
        if let Some(replies) = child.pointer("/data/replies") {
            // replies is an empty string when a comment has none
            if replies.is_object() {
                collect_bodies(replies, out);
            }
        }
    }
}

/// Find subreddit mentions in free text (`/r/name` format)
fn extract_subreddit_names(text: &str, out: &mut BTreeSet<String>) {
    let re = Regex::new(r"/r/([A-Za-z0-9_]+)").expect("subreddit mention pattern");
    for capture in re.captures_iter(text) {
        out.insert(capture[1].to_string());
    }
}

fn string_field(data: &Value, key: &str) -> String {
    data.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}
