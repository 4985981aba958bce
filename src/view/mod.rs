//! Tab selection and feed-item classification.
//!
//! Nothing in here performs I/O or holds state: the widget calls
//! [`select_view`] and [`plan_feed`] on every draw.

pub mod classifier;
pub mod format;
pub mod selector;
pub mod tab;

pub use classifier::{classify, plan_feed, render_key, KeyedPlan, RenderPlan, RetweetPlan, TweetPlan};
pub use selector::{select_view, FeedView};
pub use tab::Tab;
