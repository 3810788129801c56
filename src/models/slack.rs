use serde::{Deserialize, Serialize};

use crate::models::status::Color;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlackMessage {
    pub icon_emoji: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,

    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub mrkdwn_in: Vec<String>,
    pub fallback: String,
    pub author_name: String,
    pub author_icon: String,
    pub author_link: String,
    pub text: String,
    pub footer: String,
    pub footer_icon: String,
    pub footer_link: String,
    pub fields: Vec<AttachmentField>,
    pub color: Color,
}

/// A `null` value renders the title alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentField {
    pub title: String,
    pub value: Option<String>,
    pub short: bool,
}
