//! Conversation records.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use contracts_core::{
    Contract, ContractResult, ConversationId, SchemaVersion, Timestamp, ValidationError,
};

use crate::message::Message;

/// Lifecycle of a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStatus {
    Active,
    WaitingReply,
    TimedOut,
    Completed,
}

/// Ordered message thread between a fixed set of participants.
///
/// Invariants: participants are non-empty, every message belongs to this
/// conversation, and message timestamps are non-decreasing. Appending goes
/// through [`Conversation::with_message`], which returns a new instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawConversation")]
pub struct Conversation {
    id: ConversationId,
    participants: BTreeSet<String>,
    #[serde(default = "default_status")]
    status: ConversationStatus,
    started_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_activity_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "SchemaVersion::is_baseline")]
    schema_version: SchemaVersion,
}

fn default_status() -> ConversationStatus {
    ConversationStatus::Active
}

impl Conversation {
    pub fn new(
        id: ConversationId,
        participants: BTreeSet<String>,
        started_at: Timestamp,
    ) -> ContractResult<Self> {
        if participants.is_empty() {
            return Err(ValidationError::invariant(
                "participants",
                "a conversation requires at least one participant",
            ));
        }
        Ok(Self {
            id,
            participants,
            status: default_status(),
            started_at,
            last_activity_at: None,
            messages: Vec::new(),
            schema_version: SchemaVersion::default(),
        })
    }

    /// Append a message, producing a new conversation.
    ///
    /// The message must reference this conversation and must not be older
    /// than the last appended message.
    pub fn with_message(mut self, message: Message) -> ContractResult<Self> {
        validate_next(&self.id, self.messages.last(), &message)?;
        self.last_activity_at = Some(message.timestamp);
        self.messages.push(message);
        Ok(self)
    }

    /// New instance with the given status.
    pub fn with_status(self, status: ConversationStatus) -> Self {
        Self { status, ..self }
    }

    pub fn id(&self) -> &ConversationId {
        &self.id
    }

    pub fn participants(&self) -> &BTreeSet<String> {
        &self.participants
    }

    pub fn status(&self) -> ConversationStatus {
        self.status
    }

    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    pub fn last_activity_at(&self) -> Option<Timestamp> {
        self.last_activity_at
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}

impl Contract for Conversation {}

fn validate_next(
    id: &ConversationId,
    last: Option<&Message>,
    next: &Message,
) -> ContractResult<()> {
    if &next.conversation_id != id {
        return Err(ValidationError::invariant(
            "messages",
            format!(
                "message {} belongs to conversation {}, not {}",
                next.id, next.conversation_id, id
            ),
        ));
    }
    if let Some(last) = last {
        if next.timestamp < last.timestamp {
            return Err(ValidationError::invariant(
                "messages",
                "message timestamps must be non-decreasing",
            ));
        }
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct RawConversation {
    id: ConversationId,
    participants: BTreeSet<String>,
    #[serde(default = "default_status")]
    status: ConversationStatus,
    started_at: Timestamp,
    #[serde(default)]
    last_activity_at: Option<Timestamp>,
    #[serde(default)]
    messages: Vec<Message>,
    #[serde(default)]
    schema_version: SchemaVersion,
}

impl TryFrom<RawConversation> for Conversation {
    type Error = ValidationError;

    fn try_from(raw: RawConversation) -> Result<Self, Self::Error> {
        if raw.participants.is_empty() {
            return Err(ValidationError::invariant(
                "participants",
                "a conversation requires at least one participant",
            ));
        }
        let mut previous: Option<&Message> = None;
        for message in &raw.messages {
            validate_next(&raw.id, previous, message)?;
            previous = Some(message);
        }
        Ok(Self {
            id: raw.id,
            participants: raw.participants,
            status: raw.status,
            started_at: raw.started_at,
            last_activity_at: raw.last_activity_at,
            messages: raw.messages,
            schema_version: raw.schema_version,
        })
    }
}
