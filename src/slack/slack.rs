use super::http::{Endpoint, SlackHttpClient};
use super::{Channel, ChannelTypes, Page, SlackApi, User};
use crate::error::{ConfigError, SlackError};
use async_trait::async_trait;
use serde::de::IgnoredAny;
use serde_derive::{Deserialize, Serialize};

static PAGE_LIMIT: &str = "200";

#[derive(Deserialize, Default)]
struct ResponseMetadata {
    #[serde(default)]
    next_cursor: String,
}

#[derive(Deserialize)]
struct ConversationsListResponse {
    #[serde(default)]
    channels: Vec<Channel>,
    #[serde(default)]
    response_metadata: ResponseMetadata,
}

#[derive(Deserialize)]
struct ConversationsMembersResponse {
    #[serde(default)]
    members: Vec<String>,
    #[serde(default)]
    response_metadata: ResponseMetadata,
}

#[derive(Deserialize)]
struct UsersLookupResponse {
    user: User,
}

#[derive(Serialize)]
struct InviteRequest<'a> {
    channel: &'a str,
    users: String,
}

#[derive(Serialize)]
struct KickRequest<'a> {
    channel: &'a str,
    user: &'a str,
}

pub struct Slack {
    http_client: SlackHttpClient,
}

impl Slack {
    pub fn new(token: &str, api_base: &str) -> Result<Slack, ConfigError> {
        Ok(Slack {
            http_client: SlackHttpClient::new(token, api_base)?,
        })
    }
}

#[async_trait]
impl SlackApi for Slack {
    // NOTE: Won't return archived channels
    async fn channels_page(
        &self,
        types: ChannelTypes,
        cursor: &str,
    ) -> Result<Page<Channel>, SlackError> {
        let params = [
            ("cursor", cursor),
            ("exclude_archived", "true"),
            ("limit", PAGE_LIMIT),
            ("types", types.as_param()),
        ];
        let res: ConversationsListResponse = self
            .http_client
            .api_call(Endpoint::ConversationsList, &params)
            .await?;
        Ok(Page {
            items: res.channels,
            next_cursor: res.response_metadata.next_cursor,
        })
    }

    async fn members_page(
        &self,
        channel_id: &str,
        cursor: &str,
    ) -> Result<Page<String>, SlackError> {
        let params = [
            ("cursor", cursor),
            ("limit", PAGE_LIMIT),
            ("channel", channel_id),
        ];
        let res: ConversationsMembersResponse = self
            .http_client
            .api_call(Endpoint::ConversationsMembers, &params)
            .await?;
        Ok(Page {
            items: res.members,
            next_cursor: res.response_metadata.next_cursor,
        })
    }

    async fn lookup_by_email(&self, email: &str) -> Result<User, SlackError> {
        let res: UsersLookupResponse = self
            .http_client
            .api_call(Endpoint::UsersLookupByEmail, &[("email", email)])
            .await?;
        Ok(res.user)
    }

    async fn user_info(&self, user_id: &str) -> Result<User, SlackError> {
        let res: UsersLookupResponse = self
            .http_client
            .api_call(Endpoint::UsersInfo, &[("user", user_id)])
            .await?;
        Ok(res.user)
    }

    async fn invite(&self, channel_id: &str, user_ids: &[String]) -> Result<(), SlackError> {
        let body = InviteRequest {
            channel: channel_id,
            users: user_ids.join(","),
        };
        let _: IgnoredAny = self
            .http_client
            .api_call(Endpoint::ConversationsInvite, &body)
            .await?;
        Ok(())
    }

    async fn kick(&self, channel_id: &str, user_id: &str) -> Result<(), SlackError> {
        let body = KickRequest {
            channel: channel_id,
            user: user_id,
        };
        let _: IgnoredAny = self
            .http_client
            .api_call(Endpoint::ConversationsKick, &body)
            .await?;
        Ok(())
    }
}
