use crate::slack::{SlackApi, User};
use tracing::warn;

/// A user as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserRef {
    Email(String),
    Id(String),
}

impl UserRef {
    /// Anything containing an `@` is looked up as an email address; the rest
    /// is taken to already be a Slack user ID.
    pub fn classify(token: &str) -> UserRef {
        if token.contains('@') {
            UserRef::Email(token.to_owned())
        } else {
            UserRef::Id(token.to_owned())
        }
    }
}

/// Splits a comma separated argument, dropping blank entries.
pub fn split_list(arg: &str) -> Vec<String> {
    arg.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

pub fn classify_all(arg: &str) -> Vec<UserRef> {
    split_list(arg).iter().map(|t| UserRef::classify(t)).collect()
}

/// Resolves every reference in order. References that Slack can't resolve
/// are logged and left out; duplicates are kept.
pub async fn resolve_users<S, W>(api: &S, refs: &[UserRef], out: &mut W) -> std::io::Result<Vec<User>>
where
    S: SlackApi + ?Sized,
    W: std::io::Write,
{
    let mut users = Vec::with_capacity(refs.len());
    for user_ref in refs {
        match user_ref {
            UserRef::Email(email) => match api.lookup_by_email(email).await {
                Ok(user) => {
                    writeln!(out, "Valid user (ID: {}) found for '{}'", user.id, email)?;
                    users.push(user);
                }
                Err(err) => {
                    warn!("Error while looking up user with email {}: {}", email, err);
                }
            },
            UserRef::Id(id) => match api.user_info(id).await {
                Ok(user) => {
                    writeln!(
                        out,
                        "Valid user (ID: {}) provided for {} ({})",
                        id,
                        user.real_name(),
                        user.name
                    )?;
                    // Keep the ID exactly as it was given.
                    users.push(User {
                        id: id.clone(),
                        ..user
                    });
                }
                Err(err) => {
                    warn!("Invalid user provided: {} {}", id, err);
                }
            },
        }
    }
    Ok(users)
}

pub fn user_ids(users: &[User]) -> Vec<String> {
    users.iter().map(|u| u.id.clone()).collect()
}
