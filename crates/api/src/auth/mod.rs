//! Session authentication for Lensfolio

pub mod session;

pub use session::{AuthClient, SessionError, SessionLookup};
