//! Wire protocol
//!
//! JSON text frames with a `type` discriminator, plus close-code handling.

mod close_codes;
mod event_types;
mod frames;

pub use close_codes::{should_retry, CloseCode, ABNORMAL_CLOSURE, NORMAL_CLOSURE};
pub use event_types::EventType;
pub use frames::{ClientFrame, ServerFrame};
