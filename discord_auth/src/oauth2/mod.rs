mod config;
mod errors;
mod main;
mod types;

pub use config::{ProviderConfig, TokenAuthMethod, callback_path};
pub use errors::OAuth2Error;
pub use main::OAuth2Client;
pub use types::{AccessToken, AuthResponse, PendingState, Profile};
