//! Enumerations shared across contract namespaces.
//!
//! Enums are closed variant sets serialized as their snake_case wire name;
//! values outside the set fail validation.

use serde::{Deserialize, Serialize};

/// Originating system of a payload or event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceSystem {
    Hub,
    QboLeg,
    GlLeg,
    AiTranslator,
    Messaging,
    TaxEngine,
}
