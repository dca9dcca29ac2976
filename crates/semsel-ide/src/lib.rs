//! Semantic selection: growing, shrinking and moving a text selection along
//! the constituents of a parse.

mod anchor;
pub mod controller;
pub mod highlight;
mod session;
mod trim;


pub use anchor::AnchorTracker;
pub use controller::{DEFAULT_LEVEL, Gesture, Rejected, Selection, apply};
pub use session::{Session, SessionError, fingerprint};
pub use trim::trim_whitespace;
