use crate::feeds::Profile;
use crate::view::format::{format_timestamp, pluralize};
use crate::view::{plan_feed, FeedView, RenderPlan};
use std::fmt::Write;

/// Render a view as plain text for non-interactive output.
pub fn render_text(view: &FeedView, profile: &Profile, width: usize) -> String {
    let width = width.max(20);
    let mut out = String::new();

    let heading = if profile.username.is_empty() {
        view.title.clone()
    } else {
        format!("{} (@{})", view.title, profile.username)
    };
    let _ = writeln!(out, "{}", heading);
    let _ = writeln!(out, "{}", "=".repeat(heading.chars().count()));

    if view.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", view.empty_heading);
        for line in textwrap::wrap(view.empty_message, width) {
            let _ = writeln!(out, "{}", line);
        }
        return out;
    }

    for keyed in plan_feed(view.active_items) {
        let _ = writeln!(out);
        match keyed.plan {
            RenderPlan::Tweet(tweet) => {
                match tweet.created_at.and_then(format_timestamp) {
                    Some(date) => {
                        let _ = writeln!(out, "@{} · {}", tweet.username, date);
                    }
                    None => {
                        let _ = writeln!(out, "@{}", tweet.username);
                    }
                }
                for line in textwrap::wrap(tweet.content, width) {
                    let _ = writeln!(out, "{}", line);
                }
                let _ = writeln!(
                    out,
                    "{} · {}",
                    pluralize(tweet.likes.len(), "like", "likes"),
                    pluralize(tweet.comments.len(), "comment", "comments"),
                );
            }
            RenderPlan::Retweet(retweet) => {
                let _ = writeln!(out, "[{}]", retweet.label);
                if let Some(quote) = retweet.quote {
                    let options = textwrap::Options::new(width)
                        .initial_indent("  > ")
                        .subsequent_indent("    ");
                    for line in textwrap::wrap(quote, options) {
                        let _ = writeln!(out, "{}", line);
                    }
                }
            }
        }
    }

    out
}
