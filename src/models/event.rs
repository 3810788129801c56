use serde::{Deserialize, Serialize};

use crate::models::error::RelayError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnsEvent {
    pub records: Vec<SnsRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnsRecord {
    pub sns: SnsNotification,
}

/// The envelope SNS wraps around the CloudFormation payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnsNotification {
    pub message: String,
    pub topic_arn: String,

    /// Must be present, but SNS sends `null` when no subject was set.
    #[serde(deserialize_with = "Option::deserialize")]
    pub subject: Option<String>,
}

impl SnsEvent {
    pub fn from_value(value: serde_json::Value) -> Result<Self, RelayError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Only the first record is ever delivered for an SNS subscription.
    pub fn into_notification(self) -> Result<SnsNotification, RelayError> {
        self.records
            .into_iter()
            .next()
            .map(|record| record.sns)
            .ok_or(RelayError::NoRecords)
    }
}
