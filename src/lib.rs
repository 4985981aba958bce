pub mod config;
pub mod feeds;
pub mod ui;
pub mod view;
