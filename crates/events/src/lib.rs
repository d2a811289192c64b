//! Events contract namespace.
//!
//! Cross-service event envelopes and audit records. Events are immutable
//! facts referencing other entities by identifier only.

pub mod audit;
pub mod event;

pub use audit::AuditEvent;
pub use event::{EventType, PlatformEvent, known_event_types};
