use thiserror::Error;

/// Failure of a single Slack Web API call.
#[derive(Debug, Error)]
pub enum SlackError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned non-200 status code ({status}): {body}")]
    HttpStatus {
        endpoint: &'static str,
        status: u16,
        body: String,
    },

    #[error("non-ok response from {endpoint}: {code}")]
    Api { endpoint: &'static str, code: String },

    #[error("unexpected response from {endpoint}: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl SlackError {
    /// Remote error code, when Slack answered with `ok: false`.
    pub fn api_code(&self) -> Option<&str> {
        match self {
            SlackError::Api { code, .. } => Some(code),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no Slack API token provided")]
    MissingToken,

    #[error("Slack API token is not a valid header value")]
    InvalidToken,

    #[error("could not build HTTP client: {0}")]
    HttpClient(String),

    #[error("action '{0}' needs both --emails and --channels")]
    MissingTargets(&'static str),

    #[error("no users found - aborting")]
    NoUsersResolved,

    #[error("could not read settings file {path}: {reason}")]
    Settings { path: String, reason: String },
}

/// Everything that can end a run early.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Slack(#[from] SlackError),

    #[error("could not write output: {0}")]
    Output(#[from] std::io::Error),
}
