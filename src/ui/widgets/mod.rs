pub mod main_feed;

use crate::feeds::{FeedData, FeedFetcher};
use ratatui::{layout::Rect, Frame};

pub use main_feed::MainFeedWidget;

/// The entry under the cursor, flattened for the detail popup.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedItem {
    pub key: String,
    pub title: String,
    pub description: Option<String>,
    pub source: String,
    pub metadata: Option<String>,
    pub comments: Vec<String>,
}

pub trait FeedWidget {
    fn id(&self) -> String;
    fn title(&self) -> &str;
    fn render(&self, frame: &mut Frame, area: Rect, selected: bool);
    fn update_data(&mut self, data: FeedData);
    fn create_fetcher(&self) -> Box<dyn FeedFetcher>;
    fn scroll_up(&mut self);
    fn scroll_down(&mut self);
    fn set_selected(&mut self, selected: bool);

    fn get_selected_item(&self) -> Option<SelectedItem> {
        None
    }
}
