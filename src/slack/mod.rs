mod slack;
mod http;
mod channel;
mod user;
#[cfg(test)]
pub mod fake;

pub use self::slack::Slack;
pub use self::http::DEFAULT_API_BASE;
pub use self::channel::{Channel, ChannelTypes};
pub use self::user::User;

use crate::error::SlackError;
use async_trait::async_trait;

/// One page of a cursor-paginated listing. An empty `next_cursor` marks the
/// last page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_cursor: String,
}

/// The remote operations the tool relies on, one call each.
#[async_trait]
pub trait SlackApi: Send + Sync {
    async fn channels_page(
        &self,
        types: ChannelTypes,
        cursor: &str,
    ) -> Result<Page<Channel>, SlackError>;

    async fn members_page(&self, channel_id: &str, cursor: &str)
        -> Result<Page<String>, SlackError>;

    async fn lookup_by_email(&self, email: &str) -> Result<User, SlackError>;

    async fn user_info(&self, user_id: &str) -> Result<User, SlackError>;

    /// Invites every user in `user_ids` with a single call.
    async fn invite(&self, channel_id: &str, user_ids: &[String]) -> Result<(), SlackError>;

    /// Slack only removes one user per call.
    async fn kick(&self, channel_id: &str, user_id: &str) -> Result<(), SlackError>;
}
