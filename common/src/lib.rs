use anyhow::Result;
use async_trait::async_trait;

mod criteria;
mod tweet;

pub use criteria::{Geo, TweetCriteria, Usernames};
pub use tweet::Tweet;

/// Callback receiving each batch of tweets as it is retrieved.
pub type ReceiveBuffer<'a> = dyn FnMut(&[Tweet]) -> Result<()> + Send + 'a;

/// Something that can look up old tweets matching a [`TweetCriteria`].
///
/// Implementations call `receive` zero or more times, each time with a non-empty batch,
/// and stop at the first error returned by either the retrieval or the callback.
#[async_trait]
pub trait TweetSource {
    async fn get_tweets(
        &self,
        criteria: &TweetCriteria,
        receive: &mut ReceiveBuffer<'_>,
    ) -> Result<()>;
}
