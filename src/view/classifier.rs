use crate::feeds::{Comment, FeedItem, ItemKind};
use std::collections::BTreeSet;

pub const RETWEET_LABEL: &str = "Retweet";

/// Classified data for one feed item.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderPlan<'a> {
    Tweet(TweetPlan<'a>),
    Retweet(RetweetPlan<'a>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TweetPlan<'a> {
    pub id: &'a str,
    pub username: &'a str,
    pub content: &'a str,
    pub comments: &'a [Comment],
    pub likes: &'a BTreeSet<String>,
    pub created_at: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RetweetPlan<'a> {
    pub kind: ItemKind,
    pub label: &'static str,
    /// Only set for quote-retweets.
    pub quote: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyedPlan<'a> {
    pub key: String,
    pub plan: RenderPlan<'a>,
}

/// Switch on the item's variant. `original_tweet_id` is never looked at.
pub fn classify(item: &FeedItem) -> RenderPlan<'_> {
    match item {
        FeedItem::Retweet(_) => RenderPlan::Retweet(RetweetPlan {
            kind: ItemKind::Retweet,
            label: RETWEET_LABEL,
            quote: None,
        }),
        FeedItem::QuoteRetweet(q) => RenderPlan::Retweet(RetweetPlan {
            kind: ItemKind::QuoteRetweet,
            label: RETWEET_LABEL,
            quote: Some(q.quote_content.as_str()),
        }),
        FeedItem::Tweet(t) => RenderPlan::Tweet(TweetPlan {
            id: &t.id,
            username: &t.username,
            content: &t.content,
            comments: &t.comments,
            likes: &t.likes,
            created_at: t.created_at.as_deref(),
        }),
    }
}

/// Key for an item within one render pass. Ids can repeat across a feed, so
/// the position is part of the key.
pub fn render_key(id: &str, index: usize) -> String {
    format!("{}:{}", id, index)
}

pub fn plan_feed(items: &[FeedItem]) -> Vec<KeyedPlan<'_>> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| KeyedPlan {
            key: render_key(item.id(), index),
            plan: classify(item),
        })
        .collect()
}
