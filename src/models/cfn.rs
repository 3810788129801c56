use std::collections::HashMap;

use serde::Serialize;

use crate::models::error::RelayError;

pub const STACK_RESOURCE_TYPE: &str = "AWS::CloudFormation::Stack";

/// Key/value pairs from the CloudFormation notification text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CfnMessage {
    fields: HashMap<String, String>,
}

impl CfnMessage {
    /// Splits the payload with shell quoting rules, then each word on its first `=`.
    pub fn parse(payload: &str) -> Result<Self, RelayError> {
        let tokens = split_words(payload)?;

        let mut fields = HashMap::with_capacity(tokens.len());
        for token in tokens {
            let (key, value) = token
                .split_once('=')
                .ok_or_else(|| RelayError::MissingSeparator(token.clone()))?;
            fields.insert(key.to_string(), value.to_string());
        }

        Ok(Self { fields })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn require(&self, key: &str) -> Result<&str, RelayError> {
        self.get(key)
            .ok_or_else(|| RelayError::MissingField(key.to_string()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn is_stack(&self) -> Result<bool, RelayError> {
        Ok(self.require("ResourceType")? == STACK_RESOURCE_TYPE)
    }

    pub fn is_self(&self) -> Result<bool, RelayError> {
        Ok(self.require("LogicalResourceId")? == self.require("StackName")?)
    }

    /// True only for events about the stack itself, not one of its resources.
    pub fn concerns_stack(&self) -> Result<bool, RelayError> {
        let is_stack = self.is_stack()?;
        let is_self = self.is_self()?;
        Ok(is_stack && is_self)
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Quote {
    None,
    Single,
    Double,
}

/// POSIX word splitting without comment handling: `#` is an ordinary character.
/// Inside double quotes a backslash only escapes `"` and `\`.
fn split_words(payload: &str) -> Result<Vec<String>, RelayError> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut in_word = false;
    let mut quote = Quote::None;
    let mut chars = payload.chars();

    while let Some(c) = chars.next() {
        match quote {
            Quote::Single => match c {
                '\'' => quote = Quote::None,
                _ => word.push(c),
            },
            Quote::Double => match c {
                '"' => quote = Quote::None,
                '\\' => match chars.next() {
                    Some(next @ ('"' | '\\')) => word.push(next),
                    Some(next) => {
                        word.push('\\');
                        word.push(next);
                    }
                    None => return Err(RelayError::TrailingEscape),
                },
                _ => word.push(c),
            },
            Quote::None => match c {
                ' ' | '\t' | '\r' | '\n' => {
                    if in_word {
                        words.push(std::mem::take(&mut word));
                        in_word = false;
                    }
                }
                '\'' => {
                    quote = Quote::Single;
                    in_word = true;
                }
                '"' => {
                    quote = Quote::Double;
                    in_word = true;
                }
                '\\' => {
                    word.push(chars.next().ok_or(RelayError::TrailingEscape)?);
                    in_word = true;
                }
                _ => {
                    word.push(c);
                    in_word = true;
                }
            },
        }
    }

    if quote != Quote::None {
        return Err(RelayError::UnterminatedQuote);
    }
    if in_word {
        words.push(word);
    }

    Ok(words)
}

#[derive(Debug, Clone, PartialEq)]
pub struct StackNotification {
    pub stack_id: String,
    pub stack_name: String,
    pub logical_resource_id: String,
    pub resource_type: String,
    pub resource_status: String,
    pub resource_status_reason: Option<String>,
    pub namespace: String,
}

impl TryFrom<&CfnMessage> for StackNotification {
    type Error = RelayError;

    fn try_from(message: &CfnMessage) -> Result<Self, Self::Error> {
        Ok(Self {
            stack_id: message.require("StackId")?.to_string(),
            stack_name: message.require("StackName")?.to_string(),
            logical_resource_id: message.require("LogicalResourceId")?.to_string(),
            resource_type: message.require("ResourceType")?.to_string(),
            resource_status: message.require("ResourceStatus")?.to_string(),
            resource_status_reason: message
                .get("ResourceStatusReason")
                .filter(|reason| !reason.is_empty())
                .map(str::to_string),
            namespace: message.require("Namespace")?.to_string(),
        })
    }
}

impl StackNotification {
    pub fn status_text(&self) -> String {
        match &self.resource_status_reason {
            Some(reason) => format!("{}: {}", self.resource_status, reason),
            None => self.resource_status.clone(),
        }
    }

    pub fn is_self(&self) -> bool {
        self.logical_resource_id == self.stack_name
    }
}
