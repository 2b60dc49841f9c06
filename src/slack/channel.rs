use serde_derive::Deserialize;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: String,
    pub name: String,
}

/// Which conversation types `conversations.list` should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelTypes {
    Public,
    // Needs the `groups:read` scope.
    PublicAndPrivate,
}

impl ChannelTypes {
    pub fn new(include_private: bool) -> ChannelTypes {
        if include_private {
            ChannelTypes::PublicAndPrivate
        } else {
            ChannelTypes::Public
        }
    }

    pub fn as_param(self) -> &'static str {
        match self {
            ChannelTypes::Public => "public_channel",
            ChannelTypes::PublicAndPrivate => "private_channel,public_channel",
        }
    }
}
