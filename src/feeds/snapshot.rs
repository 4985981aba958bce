use super::{FeedData, FeedFetcher, FeedSnapshot};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;

/// Reads a `FeedSnapshot` from a JSON document on disk.
pub struct SnapshotFetcher {
    path: PathBuf,
}

impl SnapshotFetcher {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    async fn load(&self) -> Result<FeedSnapshot> {
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read snapshot: {}", self.path.display()))?;
        let snapshot: FeedSnapshot = serde_json::from_str(&body)
            .with_context(|| format!("Failed to parse snapshot: {}", self.path.display()))?;
        Ok(snapshot)
    }
}

#[async_trait]
impl FeedFetcher for SnapshotFetcher {
    async fn fetch(&self) -> Result<FeedData> {
        let snapshot = self.load().await?;
        tracing::debug!(
            path = %self.path.display(),
            feeds = snapshot.feeds.len(),
            user_tweets = snapshot.user_tweets.len(),
            search_result = snapshot.search_result.len(),
            "snapshot loaded"
        );
        Ok(FeedData::Snapshot(snapshot))
    }
}

/// Fetcher used when no snapshot is configured.
pub struct EmptyFetcher;

#[async_trait]
impl FeedFetcher for EmptyFetcher {
    async fn fetch(&self) -> Result<FeedData> {
        Ok(FeedData::Snapshot(FeedSnapshot::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SNAPSHOT: &str = r#"{
        "feeds": [
            {"id": "t1", "username": "alice", "content": "hello", "likes": [], "comments": []},
            {"type": "retweet", "id": "r1", "username": "bob", "original_tweet_id": "t1", "retweeted_at": "", "retweet_count": 1}
        ],
        "user_tweets": [],
        "search_result": [
            {"type": "tweet", "id": "t2", "username": "carol", "content": "rust"}
        ],
        "profile": {"username": "alice"}
    }"#;

    #[tokio::test]
    async fn test_fetch_snapshot() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT.as_bytes()).unwrap();

        let fetcher = SnapshotFetcher::new(file.path().to_path_buf());
        match fetcher.fetch().await.unwrap() {
            FeedData::Snapshot(snapshot) => {
                assert_eq!(snapshot.feeds.len(), 2);
                assert!(snapshot.user_tweets.is_empty());
                assert_eq!(snapshot.search_result.len(), 1);
                assert_eq!(snapshot.profile.username, "alice");
            }
            other => panic!("unexpected data: {:?}", other),
        }
    }

    #[test]
    fn test_demo_snapshot_parses() {
        let snapshot: FeedSnapshot =
            serde_json::from_str(include_str!("../../demos/snapshot.json")).unwrap();
        let kinds: Vec<&str> = snapshot.feeds.iter().map(|i| i.kind().as_str()).collect();
        assert_eq!(kinds, vec!["tweet", "retweet", "quote-retweet"]);
        assert_eq!(snapshot.user_tweets.len(), 1);
        assert_eq!(snapshot.profile.username, "alice");
    }

    #[tokio::test]
    async fn test_fetch_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = SnapshotFetcher::new(dir.path().join("missing.json"));
        let err = fetcher.fetch().await.unwrap_err();
        assert!(err.to_string().contains("Failed to read snapshot"));
    }

    #[tokio::test]
    async fn test_fetch_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{not json").unwrap();

        let fetcher = SnapshotFetcher::new(file.path().to_path_buf());
        let err = fetcher.fetch().await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse snapshot"));
    }

    #[tokio::test]
    async fn test_empty_fetcher() {
        match EmptyFetcher.fetch().await.unwrap() {
            FeedData::Snapshot(snapshot) => assert_eq!(snapshot, FeedSnapshot::default()),
            other => panic!("unexpected data: {:?}", other),
        }
    }
}
