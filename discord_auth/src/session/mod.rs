mod config;
mod errors;
mod main;
mod types;

pub use config::SessionConfig;
pub use errors::SessionError;
pub use main::{SessionCodec, SessionStore};
pub use types::SessionData;
