//! Login flow coordination
//!
//! Ties the OAuth client and the session store together for the three
//! state-changing steps of the flow: starting a login, completing it from
//! the provider callback, and logging out.

mod context;
mod errors;
mod oauth2;

pub use context::AuthContext;
pub use errors::CoordinationError;
pub use oauth2::{authorize_core, logout_core, prepare_login_core};
