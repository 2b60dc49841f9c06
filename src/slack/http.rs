pub static DEFAULT_API_BASE: &str = "https://slack.com/api/";

use crate::error::{ConfigError, SlackError};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{header, Client, ClientBuilder, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::ser::Serialize;
use serde_json::Value;

/// The Web API methods this tool talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    ConversationsList,
    ConversationsMembers,
    UsersLookupByEmail,
    UsersInfo,
    ConversationsInvite,
    ConversationsKick,
}

impl Endpoint {
    pub fn name(self) -> &'static str {
        match self {
            Endpoint::ConversationsList => "conversations.list",
            Endpoint::ConversationsMembers => "conversations.members",
            Endpoint::UsersLookupByEmail => "users.lookupByEmail",
            Endpoint::UsersInfo => "users.info",
            Endpoint::ConversationsInvite => "conversations.invite",
            Endpoint::ConversationsKick => "conversations.kick",
        }
    }

    pub fn method(self) -> Method {
        match self {
            Endpoint::ConversationsInvite | Endpoint::ConversationsKick => Method::POST,
            _ => Method::GET,
        }
    }
}

pub struct SlackHttpClient {
    client: Client,
    api_base: String,
}

impl SlackHttpClient {
    pub fn new(auth_token: &str, api_base: &str) -> Result<SlackHttpClient, ConfigError> {
        if auth_token.is_empty() {
            return Err(ConfigError::MissingToken);
        }

        let mut auth_value = HeaderValue::from_str(&("Bearer ".to_string() + auth_token))
            .map_err(|_| ConfigError::InvalidToken)?;
        auth_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth_value);

        let client = ClientBuilder::new()
            .default_headers(headers)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        let mut api_base = api_base.to_owned();
        if !api_base.ends_with('/') {
            api_base.push('/');
        }

        Ok(SlackHttpClient { client, api_base })
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        self.api_base.clone() + endpoint.name()
    }

    /// Calls `endpoint` with `params` sent as a query string (GET) or a JSON
    /// body (POST), then checks both the HTTP status and Slack's `ok` flag.
    pub async fn api_call<P: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        params: &P,
    ) -> Result<T, SlackError> {
        let url = self.url(endpoint);
        let request = if endpoint.method() == Method::POST {
            self.client.post(&url).json(params)
        } else {
            self.client
                .get(&url)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .query(params)
        };

        let transport = |source| SlackError::Transport {
            endpoint: endpoint.name(),
            source,
        };

        let res = request.send().await.map_err(transport)?;
        let status = res.status();
        if status != StatusCode::OK {
            let body = res.text().await.unwrap_or_default();
            return Err(SlackError::HttpStatus {
                endpoint: endpoint.name(),
                status: status.as_u16(),
                body,
            });
        }

        let body = res.text().await.map_err(transport)?;
        let json: Value = serde_json::from_str(&body).map_err(|source| SlackError::Decode {
            endpoint: endpoint.name(),
            source,
        })?;
        check_envelope(endpoint, json)
    }
}

/// Every Slack response is an object with an `ok` flag; a false flag comes
/// with an `error` code.
pub(crate) fn check_envelope<T: DeserializeOwned>(
    endpoint: Endpoint,
    json: Value,
) -> Result<T, SlackError> {
    let ok = json.get("ok").and_then(Value::as_bool).unwrap_or(false);
    if !ok {
        let code = json
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("unknown_error")
            .to_owned();
        return Err(SlackError::Api {
            endpoint: endpoint.name(),
            code,
        });
    }

    serde_json::from_value(json).map_err(|source| SlackError::Decode {
        endpoint: endpoint.name(),
        source,
    })
}
