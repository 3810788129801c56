use anyhow::Result;
use cfn_notify::models::{
    cfn::{CfnMessage, StackNotification},
    error::RelayError,
    event::SnsEvent,
};
use serde_json::json;

/// Test: Quoted values are unquoted and every key is kept
#[test]
fn test_parse_strips_quotes() -> Result<()> {
    let message = CfnMessage::parse(
        r#"ResourceType="AWS::CloudFormation::Stack" StackName=foo LogicalResourceId=foo StackId="arn:aws:cloudformation:us-east-1:123456789012:stack/foo/abc" ResourceStatus=CREATE_COMPLETE ResourceStatusReason="""#,
    )?;

    assert_eq!(message.len(), 6);
    assert_eq!(message.get("ResourceType"), Some("AWS::CloudFormation::Stack"));
    assert_eq!(message.get("StackName"), Some("foo"));
    assert_eq!(message.get("LogicalResourceId"), Some("foo"));
    assert_eq!(
        message.get("StackId"),
        Some("arn:aws:cloudformation:us-east-1:123456789012:stack/foo/abc")
    );
    assert_eq!(message.get("ResourceStatus"), Some("CREATE_COMPLETE"));
    assert_eq!(message.get("ResourceStatusReason"), Some(""));

    Ok(())
}

/// Test: Multi-line SNS payloads with single quotes and embedded JSON parse cleanly
#[test]
fn test_parse_multiline_sns_payload() -> Result<()> {
    let payload = "StackId='arn:aws:cloudformation:eu-west-1:123456789012:stack/web/1a2b'\n\
                   Timestamp='2024-05-01T10:00:00.000Z'\n\
                   LogicalResourceId='Bucket'\n\
                   Namespace='123456789012'\n\
                   ResourceProperties='{\"BucketName\":\"assets\"}'\n\
                   ResourceStatus='CREATE_IN_PROGRESS'\n\
                   ResourceStatusReason='Resource creation Initiated'\n\
                   ResourceType='AWS::S3::Bucket'\n\
                   StackName='web'\n";

    let message = CfnMessage::parse(payload)?;

    assert_eq!(message.get("ResourceProperties"), Some(r#"{"BucketName":"assets"}"#));
    assert_eq!(message.get("ResourceStatusReason"), Some("Resource creation Initiated"));
    assert_eq!(message.get("StackName"), Some("web"));

    Ok(())
}

/// Test: Values split on the first '=' only
#[test]
fn test_parse_keeps_equals_in_value() -> Result<()> {
    let message = CfnMessage::parse("Filter=a=b=c")?;

    assert_eq!(message.get("Filter"), Some("a=b=c"));

    Ok(())
}

/// Test: Duplicate keys keep the last value
#[test]
fn test_parse_last_duplicate_wins() -> Result<()> {
    let message = CfnMessage::parse("StackName=first StackName=second")?;

    assert_eq!(message.len(), 1);
    assert_eq!(message.get("StackName"), Some("second"));

    Ok(())
}

/// Test: A token without '=' is rejected
#[test]
fn test_parse_rejects_token_without_separator() {
    let result = CfnMessage::parse("StackName=foo orphan");

    assert!(matches!(result, Err(RelayError::MissingSeparator(token)) if token == "orphan"));
}

/// Test: '#' is an ordinary character, not the start of a comment
#[test]
fn test_parse_keeps_hash_tokens() -> Result<()> {
    let message = CfnMessage::parse("A=1 #B=2 C=3")?;

    assert_eq!(message.len(), 3);
    assert_eq!(message.get("A"), Some("1"));
    assert_eq!(message.get("#B"), Some("2"));
    assert_eq!(message.get("C"), Some("3"));

    let result = CfnMessage::parse("A=1 #note");
    assert!(matches!(result, Err(RelayError::MissingSeparator(token)) if token == "#note"));

    Ok(())
}

/// Test: Backslashes follow POSIX rules inside and outside double quotes
#[test]
fn test_parse_backslash_escapes() -> Result<()> {
    let message = CfnMessage::parse(r#"Dollar="x\$y" Quote="a\"b" Slash="c\\d" Bare=e\ f Single='g\h'"#)?;

    assert_eq!(message.get("Dollar"), Some(r"x\$y"));
    assert_eq!(message.get("Quote"), Some(r#"a"b"#));
    assert_eq!(message.get("Slash"), Some(r"c\d"));
    assert_eq!(message.get("Bare"), Some("e f"));
    assert_eq!(message.get("Single"), Some(r"g\h"));

    Ok(())
}

/// Test: A trailing backslash is rejected
#[test]
fn test_parse_rejects_trailing_escape() {
    assert!(matches!(CfnMessage::parse("A=1 B=\\"), Err(RelayError::TrailingEscape)));
}

/// Test: Unterminated quotes are rejected
#[test]
fn test_parse_rejects_unterminated_quote() {
    let result = CfnMessage::parse("StackName='foo ResourceStatus=CREATE_COMPLETE");

    assert!(matches!(result, Err(RelayError::UnterminatedQuote)));
}

/// Test: Only the stack's own resource passes the filter
#[test]
fn test_filter_predicates() -> Result<()> {
    let own = CfnMessage::parse("ResourceType=AWS::CloudFormation::Stack LogicalResourceId=web StackName=web")?;
    assert!(own.is_stack()?);
    assert!(own.is_self()?);
    assert!(own.concerns_stack()?);

    let bucket = CfnMessage::parse("ResourceType=AWS::S3::Bucket LogicalResourceId=web StackName=web")?;
    assert!(!bucket.is_stack()?);
    assert!(!bucket.concerns_stack()?);

    let nested = CfnMessage::parse("ResourceType=AWS::CloudFormation::Stack LogicalResourceId=Child StackName=web")?;
    assert!(nested.is_stack()?);
    assert!(!nested.is_self()?);
    assert!(!nested.concerns_stack()?);

    Ok(())
}

/// Test: Filtering on a payload without ResourceType is malformed input
#[test]
fn test_filter_requires_resource_type() -> Result<()> {
    let message = CfnMessage::parse("LogicalResourceId=web StackName=web")?;

    assert!(matches!(
        message.concerns_stack(),
        Err(RelayError::MissingField(field)) if field == "ResourceType"
    ));

    Ok(())
}

/// Test: Both filter predicates are checked even when the resource is not a stack
#[test]
fn test_filter_requires_stack_name_for_resources() -> Result<()> {
    let message = CfnMessage::parse("ResourceType=AWS::S3::Bucket LogicalResourceId=Bucket")?;

    assert!(matches!(
        message.concerns_stack(),
        Err(RelayError::MissingField(field)) if field == "StackName"
    ));

    Ok(())
}

/// Test: The typed view requires Namespace and treats an empty reason as absent
#[test]
fn test_stack_notification_validation() -> Result<()> {
    let complete = CfnMessage::parse(
        "StackId=arn:aws:cloudformation:us-east-1:1:stack/web/x StackName=web LogicalResourceId=web \
         ResourceType=AWS::CloudFormation::Stack ResourceStatus=CREATE_COMPLETE ResourceStatusReason='' Namespace=1",
    )?;
    let stack = StackNotification::try_from(&complete)?;
    assert_eq!(stack.resource_status_reason, None);
    assert_eq!(stack.namespace, "1");

    let no_namespace = CfnMessage::parse(
        "StackId=arn:aws:cloudformation:us-east-1:1:stack/web/x StackName=web LogicalResourceId=web \
         ResourceType=AWS::CloudFormation::Stack ResourceStatus=CREATE_COMPLETE",
    )?;
    assert!(matches!(
        StackNotification::try_from(&no_namespace),
        Err(RelayError::MissingField(field)) if field == "Namespace"
    ));

    Ok(())
}

/// Test: The first record's SNS envelope is unwrapped
#[test]
fn test_unwrap_first_record() -> Result<()> {
    let event = json!({
        "Records": [
            { "Sns": { "Message": "first", "TopicArn": "arn:aws:sns:us-east-1:1:topic", "Subject": "AWS CloudFormation Notification" } },
            { "Sns": { "Message": "second", "TopicArn": "arn:aws:sns:us-east-1:1:other", "Subject": null } }
        ]
    });

    let notification = SnsEvent::from_value(event)?.into_notification()?;

    assert_eq!(notification.message, "first");
    assert_eq!(notification.topic_arn, "arn:aws:sns:us-east-1:1:topic");
    assert_eq!(notification.subject.as_deref(), Some("AWS CloudFormation Notification"));

    Ok(())
}

/// Test: Missing nested keys and empty record lists are malformed input
#[test]
fn test_unwrap_rejects_malformed_events() -> Result<()> {
    let missing_message = json!({ "Records": [ { "Sns": { "TopicArn": "arn:aws:sns:us-east-1:1:topic" } } ] });
    assert!(matches!(
        SnsEvent::from_value(missing_message),
        Err(RelayError::MalformedEvent(_))
    ));

    let missing_subject = json!({ "Records": [ { "Sns": { "Message": "m", "TopicArn": "t" } } ] });
    assert!(matches!(
        SnsEvent::from_value(missing_subject),
        Err(RelayError::MalformedEvent(_))
    ));

    let null_subject = json!({ "Records": [ { "Sns": { "Message": "m", "TopicArn": "t", "Subject": null } } ] });
    let notification = SnsEvent::from_value(null_subject)?.into_notification()?;
    assert_eq!(notification.subject, None);

    let no_records = json!({ "Other": [] });
    assert!(matches!(
        SnsEvent::from_value(no_records),
        Err(RelayError::MalformedEvent(_))
    ));

    let empty = SnsEvent::from_value(json!({ "Records": [] }))?;
    assert!(matches!(empty.into_notification(), Err(RelayError::NoRecords)));

    Ok(())
}
