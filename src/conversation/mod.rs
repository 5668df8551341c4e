pub mod controller;
pub mod session;

pub use controller::{ConversationController, Inbound};
pub use session::{ConversationSession, SessionState, SessionStore};
