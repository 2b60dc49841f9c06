//! In-memory `SlackApi` used by the unit tests.

use super::{Channel, ChannelTypes, Page, SlackApi, User};
use crate::error::SlackError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ChannelsPage { types: ChannelTypes, cursor: String },
    MembersPage { channel: String, cursor: String },
    LookupByEmail(String),
    UserInfo(String),
    Invite { channel: String, users: String },
    Kick { channel: String, user: String },
}

pub struct FakeSlack {
    public: Vec<Channel>,
    private: Vec<Channel>,
    channel_page_size: usize,
    failing_channel_page: Option<usize>,
    members: HashMap<String, Vec<String>>,
    member_page_size: usize,
    failing_members: HashMap<String, String>,
    by_email: HashMap<String, User>,
    by_id: HashMap<String, User>,
    invite_errors: HashMap<String, String>,
    kick_errors: HashMap<(String, String), String>,
    calls: Mutex<Vec<Call>>,
}

fn api_error(endpoint: &'static str, code: &str) -> SlackError {
    SlackError::Api {
        endpoint,
        code: code.to_owned(),
    }
}

fn paginate<T: Clone>(items: &[T], page_size: usize, cursor: &str) -> Page<T> {
    let start = cursor.parse::<usize>().unwrap_or(0).min(items.len());
    let end = (start + page_size.max(1)).min(items.len());
    Page {
        items: items[start..end].to_vec(),
        next_cursor: if end < items.len() {
            end.to_string()
        } else {
            String::new()
        },
    }
}

impl FakeSlack {
    pub fn new() -> FakeSlack {
        FakeSlack {
            public: Vec::new(),
            private: Vec::new(),
            channel_page_size: 100,
            failing_channel_page: None,
            members: HashMap::new(),
            member_page_size: 100,
            failing_members: HashMap::new(),
            by_email: HashMap::new(),
            by_id: HashMap::new(),
            invite_errors: HashMap::new(),
            kick_errors: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_channels(mut self, channels: &[(&str, &str)]) -> Self {
        self.public.extend(channels.iter().map(|(name, id)| Channel {
            id: id.to_string(),
            name: name.to_string(),
        }));
        self
    }

    pub fn with_private_channels(mut self, channels: &[(&str, &str)]) -> Self {
        self.private.extend(channels.iter().map(|(name, id)| Channel {
            id: id.to_string(),
            name: name.to_string(),
        }));
        self
    }

    pub fn channel_page_size(mut self, size: usize) -> Self {
        self.channel_page_size = size;
        self
    }

    /// Page index (0-based) at which `conversations.list` fails.
    pub fn fail_channels_page(mut self, page: usize) -> Self {
        self.failing_channel_page = Some(page);
        self
    }

    pub fn with_members(mut self, channel_id: &str, members: &[&str]) -> Self {
        self.members.insert(
            channel_id.to_owned(),
            members.iter().map(|m| m.to_string()).collect(),
        );
        self
    }

    pub fn member_page_size(mut self, size: usize) -> Self {
        self.member_page_size = size;
        self
    }

    pub fn fail_members(mut self, channel_id: &str, code: &str) -> Self {
        self.failing_members
            .insert(channel_id.to_owned(), code.to_owned());
        self
    }

    pub fn with_user(mut self, id: &str, name: &str, real_name: &str, email: Option<&str>) -> Self {
        let user = User {
            id: id.to_owned(),
            name: name.to_owned(),
            real_name: Some(real_name.to_owned()),
        };
        if let Some(email) = email {
            self.by_email.insert(email.to_owned(), user.clone());
        }
        self.by_id.insert(id.to_owned(), user);
        self
    }

    pub fn fail_invite(mut self, channel_id: &str, code: &str) -> Self {
        self.invite_errors
            .insert(channel_id.to_owned(), code.to_owned());
        self
    }

    pub fn fail_kick(mut self, channel_id: &str, user_id: &str, code: &str) -> Self {
        self.kick_errors.insert(
            (channel_id.to_owned(), user_id.to_owned()),
            code.to_owned(),
        );
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn invites(&self) -> Vec<(String, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Invite { channel, users } => Some((channel, users)),
                _ => None,
            })
            .collect()
    }

    pub fn kicks(&self) -> Vec<(String, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Kick { channel, user } => Some((channel, user)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl SlackApi for FakeSlack {
    async fn channels_page(
        &self,
        types: ChannelTypes,
        cursor: &str,
    ) -> Result<Page<Channel>, SlackError> {
        self.record(Call::ChannelsPage {
            types,
            cursor: cursor.to_owned(),
        });

        let mut channels = self.public.clone();
        if types == ChannelTypes::PublicAndPrivate {
            channels.extend(self.private.iter().cloned());
        }

        let start = cursor.parse::<usize>().unwrap_or(0);
        if let Some(failing) = self.failing_channel_page {
            if start == failing * self.channel_page_size.max(1) {
                return Err(api_error("conversations.list", "internal_error"));
            }
        }
        Ok(paginate(&channels, self.channel_page_size, cursor))
    }

    async fn members_page(
        &self,
        channel_id: &str,
        cursor: &str,
    ) -> Result<Page<String>, SlackError> {
        self.record(Call::MembersPage {
            channel: channel_id.to_owned(),
            cursor: cursor.to_owned(),
        });

        if let Some(code) = self.failing_members.get(channel_id) {
            return Err(api_error("conversations.members", code));
        }
        match self.members.get(channel_id) {
            Some(members) => Ok(paginate(members, self.member_page_size, cursor)),
            None => Err(api_error("conversations.members", "channel_not_found")),
        }
    }

    async fn lookup_by_email(&self, email: &str) -> Result<User, SlackError> {
        self.record(Call::LookupByEmail(email.to_owned()));
        self.by_email
            .get(email)
            .cloned()
            .ok_or_else(|| api_error("users.lookupByEmail", "users_not_found"))
    }

    async fn user_info(&self, user_id: &str) -> Result<User, SlackError> {
        self.record(Call::UserInfo(user_id.to_owned()));
        self.by_id
            .get(user_id)
            .cloned()
            .ok_or_else(|| api_error("users.info", "user_not_found"))
    }

    async fn invite(&self, channel_id: &str, user_ids: &[String]) -> Result<(), SlackError> {
        self.record(Call::Invite {
            channel: channel_id.to_owned(),
            users: user_ids.join(","),
        });
        match self.invite_errors.get(channel_id) {
            Some(code) => Err(api_error("conversations.invite", code)),
            None => Ok(()),
        }
    }

    async fn kick(&self, channel_id: &str, user_id: &str) -> Result<(), SlackError> {
        self.record(Call::Kick {
            channel: channel_id.to_owned(),
            user: user_id.to_owned(),
        });
        match self
            .kick_errors
            .get(&(channel_id.to_owned(), user_id.to_owned()))
        {
            Some(code) => Err(api_error("conversations.kick", code)),
            None => Ok(()),
        }
    }
}
