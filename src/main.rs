mod app;
mod error;
mod logging;
mod membership;
mod pagination;
mod report;
mod resolve;
mod settings;
mod slack;

use app::{Action, Invocation};
use clap::{CommandFactory, Parser};
use error::RunError;
use resolve::{classify_all, split_list};
use settings::Settings;
use slack::Slack;
use std::process::ExitCode;
use tracing::error;

/// Invites users to, or removes them from, Slack channels. Users are given
/// by email or user ID and channels by name; the Slack IDs are looked up
/// first.
#[derive(Parser, Debug)]
#[command(name = "slack_channel_members", version)]
struct Args {
    /// Slack OAuth access token
    #[arg(long, env = "SLACK_API_TOKEN", hide_env_values = true)]
    api_token: Option<String>,

    /// 'add' to invite users, 'remove' to remove users
    #[arg(long, value_enum, default_value_t = Action::Add)]
    action: Action,

    /// Comma separated list of Slack user emails, or user IDs
    #[arg(long, default_value = "")]
    emails: String,

    /// Comma separated list of channels to change, or to list users for
    #[arg(long, default_value = "")]
    channels: String,

    /// Include private channels (requires the 'groups:read' and 'groups:write' scopes)
    #[arg(long)]
    private: bool,

    /// List channels, or list users in the given channels if used with --channels
    #[arg(long)]
    list: bool,

    /// Log page counts while listing
    #[arg(long)]
    debug: bool,
}

async fn run(args: Args) -> Result<(), RunError> {
    let settings = Settings::load(args.api_token, args.private)?;
    let slack = Slack::new(&settings.api_token, &settings.api_base)?;

    let invocation = Invocation {
        action: args.action,
        users: classify_all(&args.emails),
        channels: split_list(&args.channels),
        include_private: settings.include_private,
        list: args.list,
    };

    let mut stdout = std::io::stdout().lock();
    app::run(&slack, &invocation, &mut stdout).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    logging::init_logging(args.debug)?;

    match run(args).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(RunError::Config(err)) => {
            error!("{}", err);
            Args::command().print_help()?;
            Ok(ExitCode::FAILURE)
        }
        Err(err) => {
            error!("{}", err);
            Ok(ExitCode::FAILURE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults_to_add() {
        let args = Args::try_parse_from(["slack_channel_members", "--api-token", "xoxb-1"]).unwrap();
        assert_eq!(args.action, Action::Add);
        assert!(!args.list && !args.private && !args.debug);
        assert!(args.emails.is_empty());
    }

    #[test]
    fn rejects_unknown_action() {
        assert!(Args::try_parse_from(["slack_channel_members", "--action", "purge"]).is_err());
    }

    #[test]
    fn parses_full_command_line() {
        let args = Args::try_parse_from([
            "slack_channel_members",
            "--api-token",
            "xoxb-1",
            "--action",
            "remove",
            "--emails",
            "a@x.com,U2",
            "--channels",
            "general,random",
            "--private",
        ])
        .unwrap();
        assert_eq!(args.action, Action::Remove);
        assert_eq!(args.api_token.as_deref(), Some("xoxb-1"));
        assert!(args.private);
        assert_eq!(classify_all(&args.emails).len(), 2);
    }
}
