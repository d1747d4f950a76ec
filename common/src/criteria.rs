use chrono::NaiveDate;

/// Search parameters handed to a [`crate::TweetSource`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TweetCriteria {
    pub query_search: Option<String>,
    pub username: Option<Usernames>,
    pub since: Option<NaiveDate>,
    pub until: Option<NaiveDate>,
    pub geo: Option<Geo>,
    /// Radius around `geo`, e.g. "15mi" or "25km".
    pub within: Option<String>,
    pub lang: Option<String>,
    pub top_tweets: bool,
    /// Maximum number of tweets per username batch. `None` means unlimited.
    pub max_tweets: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Usernames {
    One(String),
    Many(Vec<String>),
}

impl Usernames {
    pub fn as_slice(&self) -> &[String] {
        match self {
            Self::One(u) => std::slice::from_ref(u),
            Self::Many(us) => us,
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Geo {
    /// Free text place name, e.g. "Berlin, Germany"
    Near(String),
    /// Signed decimal degrees
    Coordinates { lat: f64, lon: f64 },
}
