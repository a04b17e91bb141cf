//! Domain types shared by the pages and cards.
//!
//! These are plain in-memory structs; there is no wire format behind them.
//! The mock corpus in `mock.rs` constructs them, the screens render them.

use chrono::{DateTime, Utc};

/// What kind of resource a search result points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    Web,
    Image,
    Video,
}

impl ResultKind {
    /// Short marker drawn next to the result title.
    pub fn marker(self) -> &'static str {
        match self {
            ResultKind::Web => "WEB",
            ResultKind::Image => "IMG",
            ResultKind::Video => "VID",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResultMeta {
    pub source: String,
    pub date: String,
}

/// One reference result on the results page.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub url: String,
    pub description: String,
    pub thumbnail: Option<String>,
    pub kind: ResultKind,
    pub meta: ResultMeta,
}

/// The AI answer shown in the summary card.
#[derive(Debug, Clone)]
pub struct AiSummary {
    pub text: String,
    pub sources: Vec<String>,
    pub follow_up_questions: Vec<String>,
}

/// Thumbs up / thumbs down on the AI summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Positive,
    Negative,
}

impl FeedbackKind {
    pub fn label(self) -> &'static str {
        match self {
            FeedbackKind::Positive => "positive",
            FeedbackKind::Negative => "negative",
        }
    }
}

/// A trending topic card on the home page.
#[derive(Debug, Clone)]
pub struct HotTopic {
    pub id: u32,
    pub title: String,
    pub category: String,
    pub heat: u32,
    pub description: String,
}

/// One entry in the quick-links bar.
#[derive(Debug, Clone)]
pub struct QuickLink {
    pub title: &'static str,
    pub url: &'static str,
}

/// How a past query was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Text,
    Voice,
    Image,
}

impl QueryKind {
    pub fn label(self) -> &'static str {
        match self {
            QueryKind::Text => "text",
            QueryKind::Voice => "voice",
            QueryKind::Image => "image",
        }
    }
}

/// One entry in the history sidebar.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub query: String,
    pub timestamp: DateTime<Utc>,
    pub kind: QueryKind,
}

/// Extract the host from a URL, without scheme or a leading `www.`.
///
/// Falls back to the input when it does not look like a URL.
pub fn domain_from_url(url: &str) -> &str {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    let host = rest.split(['/', '?', '#']).next().unwrap_or(rest);
    host.strip_prefix("www.").unwrap_or(host)
}

/// Compact relative timestamp for the history sidebar.
pub fn format_relative(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - timestamp).num_minutes();
    let hours = minutes / 60;
    let days = hours / 24;
    if days > 0 {
        format!("{days}d ago")
    } else if hours > 0 {
        format!("{hours}h ago")
    } else if minutes > 0 {
        format!("{minutes} min ago")
    } else {
        "just now".to_string()
    }
}

/// Mock elapsed search time in seconds, in `[0.10, 0.60)`.
///
/// Derived from a hash of the query so the readout is stable per query and
/// needs no PRNG.
pub fn search_time_for(query: &str) -> f64 {
    let mut h: u64 = 0xcbf2_9ce4_8422_2325;
    for b in query.bytes() {
        h ^= u64::from(b);
        h = h.wrapping_mul(0x100_0000_01b3);
    }
    0.10 + (h % 50) as f64 / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn domain_extraction() {
        assert_eq!(domain_from_url("https://example.com/ai-trends"), "example.com");
        assert_eq!(domain_from_url("http://www.example.com/a?b=c"), "example.com");
        assert_eq!(domain_from_url("not a url"), "not a url");
    }

    #[test]
    fn relative_time_buckets() {
        let now = Utc::now();
        assert_eq!(format_relative(now, now), "just now");
        assert_eq!(format_relative(now - TimeDelta::minutes(5), now), "5 min ago");
        assert_eq!(format_relative(now - TimeDelta::minutes(90), now), "1h ago");
        assert_eq!(format_relative(now - TimeDelta::days(3), now), "3d ago");
    }

    #[test]
    fn search_time_is_stable_and_bounded() {
        let a = search_time_for("ai trends");
        assert_eq!(a, search_time_for("ai trends"));
        for q in ["", "a", "quantum computing", "健康饮食"] {
            let t = search_time_for(q);
            assert!((0.10..0.60).contains(&t), "{q}: {t}");
        }
    }
}
