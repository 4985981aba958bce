pub mod snapshot;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub struct FeedMessage {
    pub widget_id: String,
    pub data: FeedData,
}

#[derive(Debug, Clone)]
pub enum FeedData {
    Snapshot(FeedSnapshot),
    Loading,
    Error(String),
}

/// The three item collections and the viewer's profile, as supplied by the
/// data layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedSnapshot {
    #[serde(default, deserialize_with = "lenient_items")]
    pub feeds: Vec<FeedItem>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub user_tweets: Vec<FeedItem>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub search_result: Vec<FeedItem>,
    #[serde(default)]
    pub profile: Profile,
}

/// Opaque user record. Only `username` is read; everything else is carried
/// through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub username: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub username: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TweetItem {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub content: String,
    /// Only meaningful to upstream similarity search.
    #[serde(default)]
    pub embedding: Vec<f32>,
    #[serde(default)]
    pub likes: BTreeSet<String>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retweets: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RetweetItem {
    pub tweet: TweetItem,
    pub original_tweet_id: String,
    pub retweeted_at: String,
    pub retweet_count: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRetweetItem {
    pub tweet: TweetItem,
    pub original_tweet_id: String,
    pub quote_content: String,
    pub quoted_at: String,
    pub quote_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Tweet,
    Retweet,
    QuoteRetweet,
}

impl ItemKind {
    /// Unknown tags fall back to `Tweet`.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("retweet") => ItemKind::Retweet,
            Some("quote-retweet") => ItemKind::QuoteRetweet,
            Some("tweet") | None => ItemKind::Tweet,
            Some(_) => ItemKind::Tweet,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Tweet => "tweet",
            ItemKind::Retweet => "retweet",
            ItemKind::QuoteRetweet => "quote-retweet",
        }
    }
}

/// A single entry in a feed. The wire format is a flat JSON object whose
/// `type` field selects the variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireFeedItem", into = "WireFeedItem")]
pub enum FeedItem {
    Tweet(TweetItem),
    Retweet(RetweetItem),
    QuoteRetweet(QuoteRetweetItem),
}

impl FeedItem {
    pub fn kind(&self) -> ItemKind {
        match self {
            FeedItem::Tweet(_) => ItemKind::Tweet,
            FeedItem::Retweet(_) => ItemKind::Retweet,
            FeedItem::QuoteRetweet(_) => ItemKind::QuoteRetweet,
        }
    }

    /// The fields every variant shares.
    pub fn tweet(&self) -> &TweetItem {
        match self {
            FeedItem::Tweet(t) => t,
            FeedItem::Retweet(r) => &r.tweet,
            FeedItem::QuoteRetweet(q) => &q.tweet,
        }
    }

    pub fn id(&self) -> &str {
        &self.tweet().id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireFeedItem {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    kind: Option<Value>,
    #[serde(flatten)]
    tweet: TweetItem,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    original_tweet_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    retweeted_at: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_count",
        skip_serializing_if = "Option::is_none"
    )]
    retweet_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    quote_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    quoted_at: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_count",
        skip_serializing_if = "Option::is_none"
    )]
    quote_count: Option<u64>,
}

/// Counts are accepted as integers, floats or numeric strings. Anything else
/// is treated as absent.
fn lenient_count<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(count_from_value))
}

fn count_from_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Decode a collection item by item. An entry that cannot be decoded at all
/// is dropped without affecting its siblings.
fn lenient_items<'de, D>(deserializer: D) -> std::result::Result<Vec<FeedItem>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    let items = values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<FeedItem>(value) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping undecodable feed item");
                None
            }
        })
        .collect();
    Ok(items)
}

impl From<WireFeedItem> for FeedItem {
    fn from(wire: WireFeedItem) -> Self {
        // Missing shares fields are passed through as empty values; the
        // data layer owns referential integrity.
        match ItemKind::from_tag(wire.kind.as_ref().and_then(Value::as_str)) {
            ItemKind::Retweet => FeedItem::Retweet(RetweetItem {
                tweet: wire.tweet,
                original_tweet_id: wire.original_tweet_id.unwrap_or_default(),
                retweeted_at: wire.retweeted_at.unwrap_or_default(),
                retweet_count: wire.retweet_count.unwrap_or_default(),
            }),
            ItemKind::QuoteRetweet => FeedItem::QuoteRetweet(QuoteRetweetItem {
                tweet: wire.tweet,
                original_tweet_id: wire.original_tweet_id.unwrap_or_default(),
                quote_content: wire.quote_content.unwrap_or_default(),
                quoted_at: wire.quoted_at.unwrap_or_default(),
                quote_count: wire.quote_count.unwrap_or_default(),
            }),
            ItemKind::Tweet => FeedItem::Tweet(wire.tweet),
        }
    }
}

impl From<FeedItem> for WireFeedItem {
    fn from(item: FeedItem) -> Self {
        let kind = Some(Value::from(item.kind().as_str()));
        match item {
            FeedItem::Tweet(tweet) => WireFeedItem {
                kind,
                tweet,
                original_tweet_id: None,
                retweeted_at: None,
                retweet_count: None,
                quote_content: None,
                quoted_at: None,
                quote_count: None,
            },
            FeedItem::Retweet(r) => WireFeedItem {
                kind,
                tweet: r.tweet,
                original_tweet_id: Some(r.original_tweet_id),
                retweeted_at: Some(r.retweeted_at),
                retweet_count: Some(r.retweet_count),
                quote_content: None,
                quoted_at: None,
                quote_count: None,
            },
            FeedItem::QuoteRetweet(q) => WireFeedItem {
                kind,
                tweet: q.tweet,
                original_tweet_id: Some(q.original_tweet_id),
                retweeted_at: None,
                retweet_count: None,
                quote_content: Some(q.quote_content),
                quoted_at: Some(q.quoted_at),
                quote_count: Some(q.quote_count),
            },
        }
    }
}

#[async_trait]
pub trait FeedFetcher: Send + Sync {
    async fn fetch(&self) -> Result<FeedData>;
}
