//! Read-only listings: channels, members of channels, channels of users.

use crate::error::{RunError, SlackError};
use crate::pagination::{channel_map, channel_members, sorted_names, ChannelMap};
use crate::resolve::{resolve_users, UserRef};
use crate::slack::SlackApi;
use std::io::{self, Write};
use tracing::{error, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    AllChannels,
    ChannelMembers(Vec<String>),
    /// Channels are ignored once users are given.
    UserChannels(Vec<UserRef>),
}

impl Query {
    pub fn select(channels: Vec<String>, users: Vec<UserRef>) -> Query {
        if !users.is_empty() {
            Query::UserChannels(users)
        } else if !channels.is_empty() {
            Query::ChannelMembers(channels)
        } else {
            Query::AllChannels
        }
    }
}

pub async fn run_query<S, W>(
    api: &S,
    query: &Query,
    channel_ids: &ChannelMap,
    out: &mut W,
) -> Result<(), RunError>
where
    S: SlackApi + ?Sized,
    W: Write,
{
    match query {
        Query::AllChannels => {
            writeln!(
                out,
                "List of found channels (use --private to include private channels):"
            )?;
            write_channel_table(channel_ids, out)?;
        }
        Query::ChannelMembers(channels) => {
            write_channel_members(api, channels, channel_ids, out).await?;
        }
        Query::UserChannels(refs) => {
            let users = resolve_users(api, refs, out).await?;
            writeln!(out, "Listing channels the provided users are part of.")?;
            if users.is_empty() {
                warn!("None of the provided users could be resolved");
            } else {
                // Private channels are always scanned here.
                let all_channels = channel_map(api, true).await?;
                for user in &users {
                    writeln!(out, "User {} is part of the following channels:", user.id)?;
                    for name in channels_of_user(api, &all_channels, &user.id).await? {
                        writeln!(out, "\t {}", name)?;
                    }
                }
            }
            writeln!(out, "--list does not do any further action")?;
        }
    }
    Ok(())
}

/// Aligned `name --> ID` table sorted by name, followed by all names joined
/// with commas.
pub fn write_channel_table<W: Write>(channel_ids: &ChannelMap, out: &mut W) -> io::Result<()> {
    let names = sorted_names(channel_ids);
    let width = names.iter().map(|n| n.chars().count()).max().unwrap_or(0) + 3;
    for name in &names {
        writeln!(out, "\t • {:<width$}  --> {}", name, channel_ids[*name], width = width)?;
    }
    writeln!(out, "{}", names.join(","))
}

/// For each channel, an aligned `ID --> real name (name)` table of its
/// members and a comma separated list of their IDs.
pub async fn write_channel_members<S, W>(
    api: &S,
    channels: &[String],
    channel_ids: &ChannelMap,
    out: &mut W,
) -> io::Result<()>
where
    S: SlackApi + ?Sized,
    W: Write,
{
    for channel in channels {
        let channel_id = match channel_ids.get(channel) {
            Some(id) => id,
            None => {
                warn!("Channel '{}' not found -- skipping", channel);
                continue;
            }
        };

        writeln!(out, "Listing users for channel {}", channel)?;
        let members = match channel_members(api, channel_id).await {
            Ok(members) => members,
            Err(err) => {
                error!("Error while listing users for channel {}: {}", channel, err);
                continue;
            }
        };

        let width = members.iter().map(|m| m.chars().count()).max().unwrap_or(0) + 3;
        let mut listed = Vec::with_capacity(members.len());
        for member in &members {
            match api.user_info(member).await {
                Ok(user) => {
                    writeln!(
                        out,
                        "\t\t • {:<width$} --> {} ({})",
                        member,
                        user.real_name(),
                        user.name,
                        width = width
                    )?;
                    listed.push(member.as_str());
                }
                Err(err) => {
                    warn!("Error while getting user name for {}: {}", member, err);
                }
            }
        }
        writeln!(out, "\tFull list of users for channel {}:", channel)?;
        writeln!(out, "{}", listed.join(","))?;
    }
    Ok(())
}

/// Slack has no user to channels lookup, so every channel's member list is
/// scanned. Names come back sorted.
pub async fn channels_of_user<S: SlackApi + ?Sized>(
    api: &S,
    channel_ids: &ChannelMap,
    user_id: &str,
) -> Result<Vec<String>, SlackError> {
    let mut member_of = Vec::new();
    for name in sorted_names(channel_ids) {
        let members = channel_members(api, &channel_ids[name]).await?;
        if members.iter().any(|m| m == user_id) {
            member_of.push(name.to_owned());
        }
    }
    Ok(member_of)
}
