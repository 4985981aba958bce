use std::fmt;
use url::{form_urlencoded, Url};

/// Name of the query-string parameter carrying the active tab.
pub const TAB_PARAM: &str = "tab";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Home,
    Profile,
    User,
    Search,
    /// An unrecognized tab name. Selects like `Home` but is not `Home`.
    Other,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Home, Tab::Profile, Tab::User, Tab::Search];

    /// Resolve a raw tab name. An empty name is `Home`; anything else that
    /// is not recognized is `Other`.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "" | "home" => Tab::Home,
            "profile" => Tab::Profile,
            "user" => Tab::User,
            "search" => Tab::Search,
            _ => Tab::Other,
        }
    }

    /// Read the `tab` parameter from a full URL or a bare query string such
    /// as `?tab=search&q=rust`. A missing parameter resolves to `Home`.
    pub fn from_query(input: &str) -> Self {
        let input = input.trim();
        let value = match Url::parse(input) {
            Ok(url) => url
                .query_pairs()
                .find(|(key, _)| key == TAB_PARAM)
                .map(|(_, value)| value.into_owned()),
            Err(_) => form_urlencoded::parse(input.trim_start_matches('?').as_bytes())
                .find(|(key, _)| key == TAB_PARAM)
                .map(|(_, value)| value.into_owned()),
        };
        value.map(|v| Tab::parse(&v)).unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Home => "home",
            Tab::Profile => "profile",
            Tab::User => "user",
            Tab::Search => "search",
            Tab::Other => "other",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Tab::Home | Tab::Other => Tab::Profile,
            Tab::Profile => Tab::User,
            Tab::User => Tab::Search,
            Tab::Search => Tab::Home,
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
