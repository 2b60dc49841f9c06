use crate::error::{ConfigError, RunError};
use crate::membership::{self, Change, ChannelReport};
use crate::pagination::{channel_map, ChannelMap};
use crate::report::{run_query, Query};
use crate::resolve::{resolve_users, user_ids, UserRef};
use crate::slack::SlackApi;
use clap::ValueEnum;
use std::io::Write;
use tracing::debug;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Invite users
    Add,
    /// Remove users
    Remove,
    /// Same as --list
    List,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Add => "add",
            Action::Remove => "remove",
            Action::List => "list",
        }
    }

    fn change(self) -> Option<Change> {
        match self {
            Action::Add => Some(Change::Invite),
            Action::Remove => Some(Change::Remove),
            Action::List => None,
        }
    }
}

/// One parsed command line.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub action: Action,
    pub users: Vec<UserRef>,
    pub channels: Vec<String>,
    pub include_private: bool,
    pub list: bool,
}

/// Runs either a listing or a membership change. The returned reports are
/// empty for listings.
pub async fn run<S, W>(
    api: &S,
    invocation: &Invocation,
    out: &mut W,
) -> Result<Vec<ChannelReport>, RunError>
where
    S: SlackApi + ?Sized,
    W: Write,
{
    match (invocation.list, invocation.action.change()) {
        (false, Some(change)) => mutate(api, invocation, change, out).await,
        _ => {
            let query = Query::select(invocation.channels.clone(), invocation.users.clone());
            let channel_ids = match query {
                // Builds its own map including private channels.
                Query::UserChannels(_) => ChannelMap::new(),
                _ => channel_map(api, invocation.include_private).await?,
            };
            run_query(api, &query, &channel_ids, out).await?;
            Ok(Vec::new())
        }
    }
}

async fn mutate<S, W>(
    api: &S,
    invocation: &Invocation,
    change: Change,
    out: &mut W,
) -> Result<Vec<ChannelReport>, RunError>
where
    S: SlackApi + ?Sized,
    W: Write,
{
    if invocation.users.is_empty() || invocation.channels.is_empty() {
        return Err(ConfigError::MissingTargets(invocation.action.as_str()).into());
    }

    let channel_ids = channel_map(api, invocation.include_private).await?;

    writeln!(out, "\nLooking up users ...")?;
    let users = resolve_users(api, &invocation.users, out).await?;
    if users.is_empty() {
        return Err(ConfigError::NoUsersResolved.into());
    }
    debug!("Total # of channels retrieved: {}", channel_ids.len());

    match change {
        Change::Invite => writeln!(out, "\nInviting users to channels ...")?,
        Change::Remove => writeln!(out, "\nRemoving users from channels ...")?,
    }
    let reports = membership::apply(
        api,
        change,
        &invocation.channels,
        &channel_ids,
        &user_ids(&users),
        out,
    )
    .await?;
    membership::log_failures(&reports);

    writeln!(out, "\nAll done!")?;
    Ok(reports)
}
