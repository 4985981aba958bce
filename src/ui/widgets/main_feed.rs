use crate::config::FeedConfig;
use crate::feeds::snapshot::{EmptyFetcher, SnapshotFetcher};
use crate::feeds::{FeedData, FeedFetcher, FeedItem, FeedSnapshot};
use crate::ui::widgets::{FeedWidget, SelectedItem};
use crate::view::format::{format_timestamp, pluralize};
use crate::view::{classify, render_key, select_view, FeedView, RenderPlan, Tab};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

const COMPOSER_PROMPT: &str = "What's happening?";
const EMPTY_ICON: &str = "📝";

pub struct MainFeedWidget {
    config: FeedConfig,
    snapshot: FeedSnapshot,
    tab: Tab,
    loading: bool,
    error: Option<String>,
    scroll_state: ListState,
    selected: bool,
    /// Render key of the item the detail view was opened on.
    detail_key: Option<String>,
}

impl MainFeedWidget {
    pub fn new(config: FeedConfig, tab: Tab) -> Self {
        let mut scroll_state = ListState::default();
        scroll_state.select(Some(0));

        Self {
            config,
            snapshot: FeedSnapshot::default(),
            tab,
            loading: true,
            error: None,
            scroll_state,
            selected: false,
            detail_key: None,
        }
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: Tab) {
        if self.tab != tab {
            tracing::debug!(from = %self.tab, to = %tab, "switching tab");
        }
        self.tab = tab;
        self.detail_key = None;
        self.scroll_state.select(Some(0));
    }

    pub fn next_tab(&mut self) {
        self.set_tab(self.tab.next());
    }

    pub fn view(&self) -> FeedView<'_> {
        select_view(
            self.tab,
            &self.snapshot.feeds,
            &self.snapshot.user_tweets,
            &self.snapshot.search_result,
        )
    }

    pub fn open_detail(&mut self) {
        self.detail_key = self.get_selected_item().map(|item| item.key);
    }

    pub fn close_detail(&mut self) {
        self.detail_key = None;
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_modal_open(&self) -> bool {
        self.detail_key.is_some()
    }

    /// The selected item, but only while it is the one the detail view was
    /// opened on.
    fn detail_item(&self) -> Option<SelectedItem> {
        let key = self.detail_key.as_deref()?;
        self.get_selected_item().filter(|item| item.key == key)
    }

    fn selected_entry(&self) -> Option<(usize, &FeedItem)> {
        let idx = self.scroll_state.selected()?;
        let item = self.view().active_items.get(idx)?;
        Some((idx, item))
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::new();
        for tab in Tab::ALL {
            let style = if tab == self.tab {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(format!(" {} ", tab), style));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_composer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let prompt = Paragraph::new(Span::styled(
            COMPOSER_PROMPT,
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        frame.render_widget(prompt, area);
    }

    fn render_banner(&self, frame: &mut Frame, area: Rect, title: &str) {
        let banner = Paragraph::new(Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(banner, area);
    }

    fn render_empty(&self, frame: &mut Frame, area: Rect, view: &FeedView) {
        let text = vec![
            Line::from(""),
            Line::from(EMPTY_ICON),
            Line::from(""),
            Line::from(Span::styled(
                view.empty_heading,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                view.empty_message,
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let paragraph = Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_items(&self, frame: &mut Frame, area: Rect, view: &FeedView) {
        let width = (area.width as usize).saturating_sub(2).max(10);
        let items: Vec<ListItem> = view
            .active_items
            .iter()
            .map(|item| ListItem::new(plan_lines(&classify(item), width)))
            .collect();

        let list = List::new(items).highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

        let mut state = self.scroll_state.clone();
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_detail_view(&self, frame: &mut Frame, area: Rect, item: &SelectedItem) {
        let modal_area = center_rect(80, 80, area);
        frame.render_widget(Clear, modal_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Tweet Detail ");

        let mut text = vec![
            Line::from(vec![
                Span::styled(
                    item.source.as_str(),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    item.metadata
                        .as_deref()
                        .map(|m| format!(" · {}", m))
                        .unwrap_or_default(),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            Line::from(""),
            Line::from(item.title.as_str()),
        ];

        if let Some(description) = &item.description {
            text.push(Line::from(""));
            text.push(Line::from(Span::styled(
                description.as_str(),
                Style::default().fg(Color::Gray),
            )));
        }

        if !item.comments.is_empty() {
            text.push(Line::from(""));
            text.push(Line::from(Span::styled(
                pluralize(item.comments.len(), "comment", "comments"),
                Style::default().fg(Color::Yellow),
            )));
            for comment in &item.comments {
                text.push(Line::from(format!("  {}", comment)));
            }
        }

        text.push(Line::from(""));
        text.push(Line::from(Span::styled(
            "Esc to close",
            Style::default().fg(Color::DarkGray),
        )));

        let paragraph = Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .block(block);
        frame.render_widget(paragraph, modal_area);
    }
}

/// Lines for one classified item, content wrapped to `width`.
fn plan_lines<'a>(plan: &RenderPlan<'a>, width: usize) -> Vec<Line<'a>> {
    let mut lines = Vec::new();
    match plan {
        RenderPlan::Tweet(tweet) => {
            let mut header = vec![Span::styled(
                format!("@{}", tweet.username),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )];
            if let Some(date) = tweet.created_at.and_then(format_timestamp) {
                header.push(Span::styled(
                    format!(" · {}", date),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            lines.push(Line::from(header));

            for chunk in textwrap::wrap(tweet.content, width) {
                lines.push(Line::from(Span::styled(
                    chunk,
                    Style::default().fg(Color::White),
                )));
            }

            lines.push(Line::from(Span::styled(
                format!(
                    "♥ {}  💬 {}",
                    pluralize(tweet.likes.len(), "like", "likes"),
                    pluralize(tweet.comments.len(), "comment", "comments"),
                ),
                Style::default().fg(Color::DarkGray),
            )));
        }
        RenderPlan::Retweet(retweet) => {
            lines.push(Line::from(Span::styled(
                format!("⟲ {}", retweet.label),
                Style::default().fg(Color::DarkGray),
            )));
            if let Some(quote) = retweet.quote {
                for chunk in textwrap::wrap(quote, width.saturating_sub(2).max(1)) {
                    lines.push(Line::from(vec![
                        Span::styled("│ ", Style::default().fg(Color::DarkGray)),
                        Span::styled(chunk, Style::default().fg(Color::White)),
                    ]));
                }
            }
        }
    }
    lines.push(Line::from(""));
    lines
}

fn center_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

impl FeedWidget for MainFeedWidget {
    fn id(&self) -> String {
        format!(
            "main_feed-{}-{}",
            self.config.position.row, self.config.position.col
        )
    }

    fn title(&self) -> &str {
        &self.config.title
    }

    fn render(&self, frame: &mut Frame, area: Rect, selected: bool) {
        let border_style = if selected {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };

        let username = &self.snapshot.profile.username;
        let title = if username.is_empty() {
            format!(" {} ", self.config.title)
        } else {
            format!(" {} · @{} ", self.config.title, username)
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style);

        if self.loading {
            let loading_text = List::new(vec![ListItem::new("Loading tweets...")]).block(block);
            frame.render_widget(loading_text, area);
            return;
        }

        if let Some(ref error) = self.error {
            let error_text =
                List::new(vec![ListItem::new(format!("Error: {}", error))]).block(block);
            frame.render_widget(error_text, area);
            return;
        }

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let view = self.view();

        let mut constraints = vec![Constraint::Length(1)];
        if view.show_composer {
            constraints.push(Constraint::Length(3));
        }
        if view.show_title {
            constraints.push(Constraint::Length(2));
        }
        constraints.push(Constraint::Min(0));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        let mut next = 0;
        self.render_tab_bar(frame, chunks[next]);
        next += 1;
        if view.show_composer {
            self.render_composer(frame, chunks[next]);
            next += 1;
        }
        if view.show_title {
            self.render_banner(frame, chunks[next], &view.title);
            next += 1;
        }

        if view.is_empty() {
            self.render_empty(frame, chunks[next], &view);
        } else {
            self.render_items(frame, chunks[next], &view);
        }

        if let Some(item) = self.detail_item() {
            self.render_detail_view(frame, area, &item);
        }
    }

    fn update_data(&mut self, data: FeedData) {
        self.loading = false;
        match data {
            FeedData::Snapshot(snapshot) => {
                self.snapshot = snapshot;
                self.error = None;
                let len = self.view().active_items.len();
                if self.scroll_state.selected().is_some_and(|s| s >= len) {
                    self.scroll_state.select(Some(len.saturating_sub(1)));
                }
                if self.detail_key.is_some() && self.detail_item().is_none() {
                    tracing::debug!(key = ?self.detail_key, "detail item gone after reload");
                    self.detail_key = None;
                }
            }
            FeedData::Error(e) => {
                self.error = Some(e);
            }
            FeedData::Loading => {
                self.loading = true;
            }
        }
    }

    fn create_fetcher(&self) -> Box<dyn FeedFetcher> {
        match &self.config.snapshot {
            Some(path) => Box::new(SnapshotFetcher::new(path.clone())),
            None => Box::new(EmptyFetcher),
        }
    }

    fn scroll_up(&mut self) {
        if let Some(selected) = self.scroll_state.selected() {
            if selected > 0 {
                self.scroll_state.select(Some(selected - 1));
            }
        }
    }

    fn scroll_down(&mut self) {
        let len = self.view().active_items.len();
        if let Some(selected) = self.scroll_state.selected() {
            if selected < len.saturating_sub(1) {
                self.scroll_state.select(Some(selected + 1));
            }
        }
    }

    fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    fn get_selected_item(&self) -> Option<SelectedItem> {
        let (idx, item) = self.selected_entry()?;
        let key = render_key(item.id(), idx);

        let selected = match classify(item) {
            RenderPlan::Tweet(tweet) => SelectedItem {
                key,
                title: tweet.content.to_string(),
                description: None,
                source: format!("@{}", tweet.username),
                metadata: tweet.created_at.and_then(format_timestamp),
                comments: tweet
                    .comments
                    .iter()
                    .map(|c| format!("@{}: {}", c.username, c.content))
                    .collect(),
            },
            RenderPlan::Retweet(retweet) => SelectedItem {
                key,
                title: retweet.label.to_string(),
                description: retweet.quote.map(str::to_string),
                source: format!("@{}", item.tweet().username),
                metadata: None,
                comments: Vec::new(),
            },
        };
        Some(selected)
    }
}
