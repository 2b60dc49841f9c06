//! Cursor pagination over Slack's listing methods.
//!
//! Slack signals the last page with an empty `next_cursor`. A failure on any
//! page fails the whole collection; partial listings are never returned.

use crate::error::SlackError;
use crate::slack::{ChannelTypes, Page, SlackApi};
use std::collections::HashMap;
use std::future::Future;
use tracing::debug;

/// Channel name to channel ID, fetched fresh for each run.
pub type ChannelMap = HashMap<String, String>;

/// Follows `next_cursor` from an empty cursor until Slack returns an empty
/// one, folding each page into `acc`.
pub async fn drain_pages<T, A, F, Fut>(
    what: &str,
    mut fetch: F,
    mut acc: A,
    mut accumulate: impl FnMut(&mut A, Vec<T>),
) -> Result<A, SlackError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Page<T>, SlackError>>,
{
    let mut cursor = String::new();
    let mut pages = 0usize;
    loop {
        let page = fetch(cursor).await?;
        pages += 1;
        debug!("# of {} returned in page {}: {}", what, pages, page.items.len());
        accumulate(&mut acc, page.items);

        if page.next_cursor.is_empty() {
            break;
        }
        cursor = page.next_cursor;
    }
    Ok(acc)
}

/// Builds the name to ID mapping of every non-archived channel. Later pages
/// win when Slack reports the same name twice.
pub async fn channel_map<S: SlackApi + ?Sized>(
    api: &S,
    include_private: bool,
) -> Result<ChannelMap, SlackError> {
    let types = ChannelTypes::new(include_private);
    drain_pages(
        "channels",
        move |cursor| async move { api.channels_page(types, &cursor).await },
        ChannelMap::new(),
        |map, channels| {
            for channel in channels {
                map.insert(channel.name, channel.id);
            }
        },
    )
    .await
}

/// Every member ID of `channel_id`, in the order Slack returns them.
pub async fn channel_members<S: SlackApi + ?Sized>(
    api: &S,
    channel_id: &str,
) -> Result<Vec<String>, SlackError> {
    drain_pages(
        "users",
        move |cursor| async move { api.members_page(channel_id, &cursor).await },
        Vec::with_capacity(50),
        |members, page| members.extend(page),
    )
    .await
}

/// Channel names in lexicographic order.
pub fn sorted_names(map: &ChannelMap) -> Vec<&str> {
    let mut names: Vec<&str> = map.keys().map(String::as_str).collect();
    names.sort_unstable();
    names
}
