//! Message records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use contracts_core::{Contract, ConversationId, MessageId, SchemaVersion, Timestamp};

/// Direction of a message relative to the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageDirection {
    Inbound,
    Outbound,
}

/// Delivery lifecycle of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    Queued,
    Sent,
    Delivered,
    Read,
    Failed,
}

/// Transport channel a message travels on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Whatsapp,
    Sms,
    Email,
}

/// Single message within a conversation.
///
/// `sender` and `recipient` are channel addresses (E.164 phone numbers for
/// whatsapp/sms). The conversation link is by id, never by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub conversation_id: ConversationId,
    pub direction: MessageDirection,
    pub sender: String,
    pub recipient: String,
    pub body: String,
    #[serde(default = "default_channel")]
    pub channel: Channel,
    #[serde(default = "default_status")]
    pub status: MessageStatus,
    pub timestamp: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_name: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub template_params: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_id: Option<String>,
    #[serde(default, skip_serializing_if = "SchemaVersion::is_baseline")]
    pub schema_version: SchemaVersion,
}

fn default_channel() -> Channel {
    Channel::Whatsapp
}

fn default_status() -> MessageStatus {
    MessageStatus::Queued
}

impl Message {
    pub fn new(
        id: MessageId,
        conversation_id: ConversationId,
        direction: MessageDirection,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        body: impl Into<String>,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id,
            conversation_id,
            direction,
            sender: sender.into(),
            recipient: recipient.into(),
            body: body.into(),
            channel: default_channel(),
            status: default_status(),
            timestamp,
            template_name: None,
            template_params: BTreeMap::new(),
            context_type: None,
            context_id: None,
            schema_version: SchemaVersion::default(),
        }
    }

    /// New instance with the given delivery status.
    pub fn with_status(self, status: MessageStatus) -> Self {
        Self { status, ..self }
    }
}

impl Contract for Message {}

/// Delivery status update reported back by the channel provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    pub message_id: MessageId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<ConversationId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_message_id: Option<String>,
    pub status: MessageStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub timestamp: Timestamp,
}

impl Contract for DeliveryReceipt {}
