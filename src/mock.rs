//! In-memory mock corpus.
//!
//! Stands in for the backend of a real search product: results, the AI
//! summary, suggestions, trending topics, quick links, and seed history.
//! Everything is constructed fresh on demand; nothing is persisted.

use chrono::{TimeDelta, Utc};

use crate::model::{
    AiSummary, HistoryEntry, HotTopic, QueryKind, QuickLink, ResultKind, ResultMeta, SearchResult,
};

/// Reference results shown next to the AI card.
pub fn results() -> Vec<SearchResult> {
    vec![
        SearchResult {
            id: "1".into(),
            title: "The State of AI: Progress and Emerging Trends".into(),
            url: "https://example.com/ai-trends".into(),
            description: "An in-depth look at where artificial intelligence stands today and \
                          where it is heading, covering recent advances in machine learning, \
                          deep learning, and natural language processing."
                .into(),
            thumbnail: Some("photo-1677442136019".into()),
            kind: ResultKind::Web,
            meta: ResultMeta {
                source: "Tech Daily".into(),
                date: "2024-02-20".into(),
            },
        },
        SearchResult {
            id: "2".into(),
            title: "Case Study: An AI-Powered Customer Service Desk".into(),
            url: "https://example.com/ai-customer-service".into(),
            description: "How one company rebuilt its support workflow around AI, from model \
                          selection through rollout and the measured impact on response times."
                .into(),
            thumbnail: Some("photo-1531746790731".into()),
            kind: ResultKind::Web,
            meta: ResultMeta {
                source: "Engineering Blog".into(),
                date: "2024-02-19".into(),
            },
        },
        SearchResult {
            id: "3".into(),
            title: "Machine Learning from Scratch: A Beginner's Path".into(),
            url: "https://example.com/ml-tutorial".into(),
            description: "A gentle introduction to machine learning with core concepts, worked \
                          examples, and a roadmap for going deeper."
                .into(),
            thumbnail: Some("photo-1515879218367".into()),
            kind: ResultKind::Web,
            meta: ResultMeta {
                source: "Open Courseware".into(),
                date: "2024-02-18".into(),
            },
        },
    ]
}

/// The AI answer for any query. Sentence-rich on purpose: the reveal
/// animation paces itself on sentence boundaries.
pub fn summary() -> AiSummary {
    AiSummary {
        text: "AI technology is driving innovation across industries at an unprecedented pace. \
               Customer service has been transformed by multimodal assistants that combine \
               text, voice, and image understanding. Response times have dropped by roughly \
               sixty percent while satisfaction scores keep climbing. Machine learning itself \
               has seen major breakthroughs, led by large-scale pretrained models and \
               self-supervised learning. Vision systems now detect objects with \
               near-human accuracy, and translation quality has improved dramatically. \
               Education is adopting personalized learning paths, adaptive question banks, \
               and real-time progress analysis. Healthcare may see the largest gains of all. \
               Imaging diagnosis assistance, accelerated drug discovery, and individualized \
               treatment planning are already in clinical use. Looking forward, expect deeper \
               integration of AI with 5G and IoT, early quantum-neural hybrids, and low-code \
               platforms that open these tools to everyone. Experts advise investing in \
               dedicated AI teams, taking data privacy seriously, and partnering with \
               research institutions to turn prototypes into products."
            .into(),
        sources: vec![
            "Tech Daily — The State of AI: annual report".into(),
            "Engineering Blog — AI customer service best practices".into(),
            "EdTech Weekly — White paper on AI in education".into(),
            "Health Innovation Forum — AI in healthcare research report".into(),
            "AI Institute — 2024 trends outlook".into(),
        ],
        follow_up_questions: vec![
            "How do AI assistants detect emotion and personalize replies?".into(),
            "What does an AI imaging-diagnosis workflow look like?".into(),
            "How are personalized learning paths generated?".into(),
            "How could quantum computing change AI?".into(),
            "What belongs in an AI ethics framework?".into(),
        ],
    }
}

/// Suggestions under the home search bar.
pub fn suggestions() -> Vec<String> {
    [
        "How to improve focus at work",
        "Top technology trends in 2024",
        "A practical guide to healthy eating",
        "Where AI is heading next",
        "Small habits for a greener life",
    ]
    .map(String::from)
    .into()
}

/// Trending topic cards on the home page.
pub fn hot_topics() -> Vec<HotTopic> {
    let raw: [(u32, &str, &str, u32, &str); 8] = [
        (
            1,
            "Global Tech Innovation Summit",
            "Tech",
            9999,
            "Frontier technology trends, with a focus on breakthroughs in AI and quantum computing",
        ),
        (
            2,
            "Electric Vehicle Market Outlook",
            "Auto",
            8888,
            "A deep dive into the EV industry today and where the market goes from here",
        ),
        (
            3,
            "The AI Ethics Debate",
            "AI",
            7777,
            "Weighing technological progress against social responsibility",
        ),
        (
            4,
            "The New Shape of Remote Work",
            "Work",
            6666,
            "How distributed work keeps evolving, and what comes next",
        ),
        (
            5,
            "Sustainability and Green Tech",
            "Climate",
            6555,
            "Innovations in environmental technology and practical paths to sustainability",
        ),
        (
            6,
            "Digital Currency Watch",
            "Finance",
            6444,
            "Tracking global digital currencies, policy shifts, and market impact",
        ),
        (
            7,
            "Prospects for the Metaverse",
            "Tech",
            6333,
            "Where immersive platforms stand and the applications on the horizon",
        ),
        (
            8,
            "Health Tech Breakthroughs",
            "Health",
            6222,
            "Medical technology milestones and the rise of smart healthcare",
        ),
    ];
    raw.into_iter()
        .map(|(id, title, category, heat, description)| HotTopic {
            id,
            title: title.into(),
            category: category.into(),
            heat,
            description: description.into(),
        })
        .collect()
}

/// The quick-links bar in the home header.
pub const QUICK_LINKS: [QuickLink; 6] = [
    QuickLink { title: "News", url: "https://news.example.com" },
    QuickLink { title: "Video", url: "https://video.example.com" },
    QuickLink { title: "Mail", url: "https://mail.example.com" },
    QuickLink { title: "Maps", url: "https://maps.example.com" },
    QuickLink { title: "Music", url: "https://music.example.com" },
    QuickLink { title: "Shopping", url: "https://shop.example.com" },
];

/// Seed entries for the history sidebar.
pub fn history() -> Vec<HistoryEntry> {
    let now = Utc::now();
    vec![
        HistoryEntry {
            query: "Where AI is heading next".into(),
            timestamp: now - TimeDelta::minutes(5),
            kind: QueryKind::Text,
        },
        HistoryEntry {
            query: "Electric vehicle market analysis".into(),
            timestamp: now - TimeDelta::minutes(30),
            kind: QueryKind::Text,
        },
        HistoryEntry {
            query: "A practical guide to healthy eating".into(),
            timestamp: now - TimeDelta::minutes(60),
            kind: QueryKind::Text,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corpus_shape() {
        assert_eq!(results().len(), 3);
        assert_eq!(hot_topics().len(), 8);
        assert_eq!(QUICK_LINKS.len(), 6);
        assert_eq!(history().len(), 3);
        let s = summary();
        assert_eq!(s.sources.len(), 5);
        assert_eq!(s.follow_up_questions.len(), 5);
        assert!(!s.text.is_empty());
    }

    #[test]
    fn summary_has_sentence_boundaries_for_pacing() {
        let chunks = crate::reveal::chunk_text(&summary().text, 60);
        assert!(chunks.len() >= 8, "summary should yield many chunks");
    }
}
