//! discord_auth - OAuth2 login against a single identity provider
//!
//! The visitor is sent to the provider's authorize endpoint, the callback
//! code is exchanged for an access token, the user-info profile is fetched
//! with it, and the profile is kept in an HMAC-signed session cookie.
//! Defaults target Discord; every endpoint can be overridden.

mod config;
mod coordination;
mod oauth2;
mod session;
mod utils;

pub use config::{ConfigError, ConfigLookup, env_lookup};

pub use coordination::{
    AuthContext, CoordinationError, authorize_core, logout_core, prepare_login_core,
};

pub use oauth2::{
    AccessToken, AuthResponse, OAuth2Client, OAuth2Error, PendingState, Profile, ProviderConfig,
    TokenAuthMethod, callback_path,
};

pub use session::{SessionCodec, SessionConfig, SessionData, SessionError, SessionStore};

pub use utils::{UtilError, gen_random_string};
