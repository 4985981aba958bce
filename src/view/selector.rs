use super::tab::Tab;
use crate::feeds::FeedItem;

pub const TITLE_YOUR_TWEETS: &str = "Your Tweets";
pub const TITLE_SEARCH: &str = "Search Results";
pub const TITLE_HOME: &str = "Home Feed";

pub const EMPTY_PROFILE: &str = "You haven't posted any tweets yet. Create your first tweet!";
pub const EMPTY_SEARCH: &str = "No tweets found. Try searching for something else.";
pub const EMPTY_HOME: &str = "No tweets to display. Follow some users or create a tweet!";

pub const HEADING_NO_RESULTS: &str = "No results found";
pub const HEADING_NO_TWEETS: &str = "No tweets yet";

/// Everything the renderer needs to lay out one tab.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedView<'a> {
    pub tab: Tab,
    pub active_items: &'a [FeedItem],
    pub title: String,
    pub empty_heading: &'static str,
    pub empty_message: &'static str,
    /// The composer sits above the feed on the home and profile tabs only,
    /// not on unrecognized tabs that fall back to the home feed.
    pub show_composer: bool,
    /// The title banner is only drawn for search results.
    pub show_title: bool,
}

impl FeedView<'_> {
    pub fn is_empty(&self) -> bool {
        self.active_items.is_empty()
    }
}

/// Pick the collection and labels for `tab`. Items are returned as given.
pub fn select_view<'a>(
    tab: Tab,
    feeds: &'a [FeedItem],
    user_tweets: &'a [FeedItem],
    search_result: &'a [FeedItem],
) -> FeedView<'a> {
    let (active_items, title, empty_message) = match tab {
        Tab::Profile | Tab::User => (user_tweets, TITLE_YOUR_TWEETS.to_string(), EMPTY_PROFILE),
        Tab::Search => (search_result, search_title(search_result.len()), EMPTY_SEARCH),
        Tab::Home | Tab::Other => (feeds, TITLE_HOME.to_string(), EMPTY_HOME),
    };

    let empty_heading = match tab {
        Tab::Search => HEADING_NO_RESULTS,
        _ => HEADING_NO_TWEETS,
    };

    FeedView {
        tab,
        active_items,
        title,
        empty_heading,
        empty_message,
        show_composer: matches!(tab, Tab::Home | Tab::Profile),
        show_title: tab == Tab::Search,
    }
}

fn search_title(count: usize) -> String {
    if count > 0 {
        format!("{} ({})", TITLE_SEARCH, count)
    } else {
        TITLE_SEARCH.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feeds::TweetItem;

    fn tweet(id: &str) -> FeedItem {
        FeedItem::Tweet(TweetItem {
            id: id.to_string(),
            username: "alice".to_string(),
            content: format!("content {}", id),
            ..Default::default()
        })
    }

    fn collections() -> (Vec<FeedItem>, Vec<FeedItem>, Vec<FeedItem>) {
        (
            vec![tweet("f1"), tweet("f2")],
            vec![tweet("u1")],
            vec![tweet("s1"), tweet("s2"), tweet("s3")],
        )
    }

    #[test]
    fn test_home_and_fallbacks_select_feeds() {
        let (feeds, user, search) = collections();
        for raw in ["home", "", "explore", "HOME"] {
            let view = select_view(Tab::parse(raw), &feeds, &user, &search);
            assert_eq!(view.active_items, feeds.as_slice());
            assert_eq!(view.title, "Home Feed");
            assert_eq!(view.empty_message, EMPTY_HOME);
        }
        let view = select_view(Tab::from_query(""), &feeds, &user, &search);
        assert_eq!(view.active_items, feeds.as_slice());
    }

    #[test]
    fn test_profile_and_user_select_user_tweets() {
        let (feeds, user, search) = collections();
        for tab in [Tab::Profile, Tab::User] {
            let view = select_view(tab, &feeds, &user, &search);
            assert_eq!(view.active_items, user.as_slice());
            assert_eq!(view.title, "Your Tweets");
            assert_eq!(view.empty_message, EMPTY_PROFILE);
            assert_eq!(view.empty_heading, HEADING_NO_TWEETS);
        }
    }

    #[test]
    fn test_profile_title_with_no_user_tweets() {
        let (feeds, _, search) = collections();
        let view = select_view(Tab::User, &feeds, &[], &search);
        assert!(view.is_empty());
        assert_eq!(view.title, "Your Tweets");
    }

    #[test]
    fn test_search_title_counts_results() {
        let (feeds, user, search) = collections();
        let view = select_view(Tab::Search, &feeds, &user, &search);
        assert_eq!(view.active_items, search.as_slice());
        assert_eq!(view.title, "Search Results (3)");
    }

    #[test]
    fn test_empty_search() {
        let (feeds, user, _) = collections();
        let view = select_view(Tab::Search, &feeds, &user, &[]);
        assert!(view.is_empty());
        assert_eq!(view.title, "Search Results");
        assert_eq!(view.empty_heading, "No results found");
        assert_eq!(
            view.empty_message,
            "No tweets found. Try searching for something else."
        );
    }

    #[test]
    fn test_empty_home() {
        let view = select_view(Tab::Home, &[], &[], &[]);
        assert!(view.active_items.is_empty());
        assert_eq!(view.empty_heading, "No tweets yet");
        assert_eq!(
            view.empty_message,
            "No tweets to display. Follow some users or create a tweet!"
        );
    }

    #[test]
    fn test_items_are_not_reordered_or_deduplicated() {
        let feeds = vec![tweet("b"), tweet("a"), tweet("b")];
        let view = select_view(Tab::Home, &feeds, &[], &[]);
        let ids: Vec<&str> = view.active_items.iter().map(|i| i.id()).collect();
        assert_eq!(ids, vec!["b", "a", "b"]);
    }

    #[test]
    fn test_composer_and_banner_visibility() {
        let cases = [
            (Tab::Home, true, false),
            (Tab::Profile, true, false),
            (Tab::User, false, false),
            (Tab::Search, false, true),
            (Tab::Other, false, false),
        ];
        for (tab, composer, banner) in cases {
            let view = select_view(tab, &[], &[], &[]);
            assert_eq!(view.show_composer, composer, "composer on {}", tab);
            assert_eq!(view.show_title, banner, "banner on {}", tab);
        }
    }

    #[test]
    fn test_unknown_tab_gets_home_feed_without_composer() {
        let (feeds, user, search) = collections();
        let view = select_view(Tab::from_query("?tab=explore"), &feeds, &user, &search);
        assert_eq!(view.active_items, feeds.as_slice());
        assert_eq!(view.title, "Home Feed");
        assert_eq!(view.empty_heading, HEADING_NO_TWEETS);
        assert!(!view.show_composer);
        assert!(!view.show_title);

        let view = select_view(Tab::from_query("?tab=home"), &feeds, &user, &search);
        assert!(view.show_composer);
    }

    #[test]
    fn test_select_view_is_idempotent() {
        let (feeds, user, search) = collections();
        for tab in Tab::ALL {
            let first = select_view(tab, &feeds, &user, &search);
            let second = select_view(tab, &feeds, &user, &search);
            assert_eq!(first, second);
        }
    }
}
