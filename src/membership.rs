use crate::error::SlackError;
use crate::pagination::ChannelMap;
use crate::slack::SlackApi;
use std::io::{self, Write};
use tracing::{debug, error, warn};

/// Error code Slack uses when an invitee is already a member.
pub static ALREADY_IN_CHANNEL: &str = "already_in_channel";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Invite,
    Remove,
}

#[derive(Debug)]
pub enum Outcome {
    Done,
    AlreadyMember,
    NotFound,
    /// `user_id` is set when a single removal failed.
    Failed {
        user_id: Option<String>,
        error: SlackError,
    },
}

#[derive(Debug)]
pub struct ChannelReport {
    pub channel: String,
    pub outcome: Outcome,
}

/// Applies `change` for `user_ids` on each named channel. Failures only stop
/// the channel they happen on.
pub async fn apply<S, W>(
    api: &S,
    change: Change,
    channels: &[String],
    channel_ids: &ChannelMap,
    user_ids: &[String],
    out: &mut W,
) -> io::Result<Vec<ChannelReport>>
where
    S: SlackApi + ?Sized,
    W: Write,
{
    let mut reports = Vec::with_capacity(channels.len());
    for channel in channels {
        let channel_id = match channel_ids.get(channel) {
            Some(id) => id,
            None => {
                warn!("Channel '{}' not found -- skipping", channel);
                reports.push(ChannelReport {
                    channel: channel.clone(),
                    outcome: Outcome::NotFound,
                });
                continue;
            }
        };

        let outcome = match change {
            Change::Invite => invite(api, channel, channel_id, user_ids).await,
            Change::Remove => {
                writeln!(out, "Removing users from channel: {}", channel)?;
                remove(api, channel_id, user_ids).await
            }
        };

        match &outcome {
            Outcome::Done => match change {
                Change::Invite => writeln!(out, "Users invited to '{}'", channel)?,
                Change::Remove => writeln!(out, "Users removed from '{}'", channel)?,
            },
            Outcome::AlreadyMember => {
                writeln!(out, "User already in channel: {}", channel)?;
                writeln!(out, "Users invited to '{}'", channel)?;
            }
            Outcome::Failed { error: err, .. } => match change {
                Change::Invite => error!(
                    "Error while inviting users to {} ({}): {}",
                    channel, channel_id, err
                ),
                Change::Remove => error!(
                    "Error while removing users from {} ({}): {}",
                    channel, channel_id, err
                ),
            },
            Outcome::NotFound => {}
        }

        reports.push(ChannelReport {
            channel: channel.clone(),
            outcome,
        });
    }
    Ok(reports)
}

/// Logs a closing line for every channel that was left unchanged or only
/// partly changed.
pub fn log_failures(reports: &[ChannelReport]) {
    for report in reports {
        match &report.outcome {
            Outcome::Failed {
                user_id: Some(user_id),
                ..
            } => warn!(
                "'{}' was only partly updated, stopped at user {}",
                report.channel, user_id
            ),
            Outcome::Failed { user_id: None, .. } => {
                warn!("'{}' was not updated", report.channel)
            }
            _ => {}
        }
    }
}

async fn invite<S: SlackApi + ?Sized>(
    api: &S,
    channel: &str,
    channel_id: &str,
    user_ids: &[String],
) -> Outcome {
    match api.invite(channel_id, user_ids).await {
        Ok(()) => Outcome::Done,
        Err(err) if err.api_code() == Some(ALREADY_IN_CHANNEL) => {
            debug!("{} already has some of the users", channel);
            Outcome::AlreadyMember
        }
        Err(error) => Outcome::Failed {
            user_id: None,
            error,
        },
    }
}

async fn remove<S: SlackApi + ?Sized>(api: &S, channel_id: &str, user_ids: &[String]) -> Outcome {
    for user_id in user_ids {
        if let Err(error) = api.kick(channel_id, user_id).await {
            debug!(
                "Error while removing user {} from channel {}: {}",
                user_id, channel_id, error
            );
            return Outcome::Failed {
                user_id: Some(user_id.clone()),
                error,
            };
        }
    }
    Outcome::Done
}
