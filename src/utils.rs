use std::sync::LazyLock;

use anyhow::{Error, Result};
use rand::Rng;
use regex::Regex;
use reqwest::StatusCode;
use tracing::{debug, info};

use crate::{
    clients::webhook::WebhookClient,
    config::Config,
    models::{
        cfn::{CfnMessage, StackNotification},
        error::RelayError,
        event::{SnsEvent, SnsNotification},
        icon::Icon,
        slack::{Attachment, AttachmentField, SlackMessage},
        status::Color,
    },
};

const AUTHOR_NAME: &str = "AWS CloudFormation";
const AUTHOR_ICON: &str = "https://github.com/danieljimenez/cf-notify/raw/master/aws_cloudformation.png";
const AUTHOR_LINK: &str = "https://console.aws.amazon.com/cloudformation/home";
const FOOTER_ICON: &str = "https://github.com/danieljimenez/cf-notify/raw/master/aws_sns.png";

static REGION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^arn:aws:cloudformation:(?P<region>[a-z]{2}-[a-z]{4,9}-[1-2])")
        .expect("region pattern is valid")
});

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Ignored,
    Delivered(StatusCode),
}

/// Stack properties that can be shown as short attachment fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackProperty {
    Namespace,
    StackName,
    LogicalResourceId,
}

pub const DISPLAY_PROPERTIES: &[StackProperty] = &[StackProperty::Namespace, StackProperty::StackName];

impl StackProperty {
    pub fn title(&self) -> &'static str {
        match self {
            StackProperty::Namespace => "Account ID",
            StackProperty::StackName => "StackName",
            StackProperty::LogicalResourceId => "LogicalResourceId",
        }
    }

    fn value(&self, stack: &StackNotification) -> Option<String> {
        match self {
            StackProperty::Namespace => Some(stack.namespace.clone()),
            StackProperty::StackName => Some(stack.stack_name.clone()),
            StackProperty::LogicalResourceId if stack.is_self() => None,
            StackProperty::LogicalResourceId => Some(stack.logical_resource_id.clone()),
        }
    }
}

pub async fn process_event<R: Rng + ?Sized>(
    event: serde_json::Value,
    config: &Config,
    webhook_client: &WebhookClient,
    rng: &mut R,
) -> Result<Outcome, Error> {
    let Some(message) = prepare_message(event, config, rng)? else {
        return Ok(Outcome::Ignored);
    };

    let status = webhook_client.send(&message).await?;

    Ok(Outcome::Delivered(status))
}

/// Everything up to delivery. `None` means the event was filtered out.
pub fn prepare_message<R: Rng + ?Sized>(
    event: serde_json::Value,
    config: &Config,
    rng: &mut R,
) -> Result<Option<SlackMessage>, RelayError> {
    info!("Event: {}", serde_json::to_string_pretty(&event)?);

    let notification = SnsEvent::from_value(event)?.into_notification()?;
    let cfn_message = CfnMessage::parse(&notification.message)?;

    info!(
        "CloudFormation message: {}",
        serde_json::to_string_pretty(&cfn_message)?
    );

    if !cfn_message.concerns_stack()? {
        info!(
            resource_type = cfn_message.get("ResourceType").unwrap_or_default(),
            logical_resource_id = cfn_message.get("LogicalResourceId").unwrap_or_default(),
            "Message ignored"
        );
        return Ok(None);
    }

    let stack = StackNotification::try_from(&cfn_message)?;

    create_message(&stack, &notification, config.channel(), rng).map(Some)
}

pub fn create_message<R: Rng + ?Sized>(
    stack: &StackNotification,
    notification: &SnsNotification,
    channel: Option<&str>,
    rng: &mut R,
) -> Result<SlackMessage, RelayError> {
    let attachment = create_attachment(stack, &notification.topic_arn)?;

    debug!(
        stack_name = %stack.stack_name,
        subject = notification.subject.as_deref().unwrap_or_default(),
        color = %attachment.color,
        "Built Slack attachment"
    );

    Ok(SlackMessage {
        icon_emoji: Icon::pick(rng).emoji().to_string(),
        channel: channel.map(str::to_string),
        attachments: vec![attachment],
    })
}

pub fn create_attachment(stack: &StackNotification, topic_arn: &str) -> Result<Attachment, RelayError> {
    let stack_url = get_stack_url(&stack.stack_id)?;
    let text = stack.status_text();

    let mut fields = display_fields(stack, DISPLAY_PROPERTIES);
    fields.push(AttachmentField {
        title: "Stack Events".to_string(),
        value: Some(format!(
            "<{}|View {} in the AWS console>",
            stack_url, stack.stack_name
        )),
        short: false,
    });

    Ok(Attachment {
        mrkdwn_in: vec!["text".to_string(), "pretext".to_string()],
        fallback: text.clone(),
        author_name: AUTHOR_NAME.to_string(),
        author_icon: AUTHOR_ICON.to_string(),
        author_link: AUTHOR_LINK.to_string(),
        text,
        footer: topic_arn.to_string(),
        footer_icon: FOOTER_ICON.to_string(),
        footer_link: format!("https://console.aws.amazon.com/sns/v2/home#/topics/{}", topic_arn),
        fields,
        color: Color::for_status(&stack.resource_status),
    })
}

pub fn display_fields(stack: &StackNotification, properties: &[StackProperty]) -> Vec<AttachmentField> {
    properties
        .iter()
        .map(|property| AttachmentField {
            title: property.title().to_string(),
            value: property.value(stack),
            short: true,
        })
        .collect()
}

pub fn get_stack_region(stack_id: &str) -> Result<&str, RelayError> {
    REGION_PATTERN
        .captures(stack_id)
        .and_then(|captures| captures.name("region"))
        .map(|region| region.as_str())
        .ok_or_else(|| RelayError::UnrecognizedStackId(stack_id.to_string()))
}

pub fn get_stack_url(stack_id: &str) -> Result<String, RelayError> {
    let region = get_stack_region(stack_id)?;

    Ok(format!(
        "https://{region}.console.aws.amazon.com/cloudformation/home?region={region}#/stack/detail?stackId={}",
        stack_id.replace('/', "%2F")
    ))
}
