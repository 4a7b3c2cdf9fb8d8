//! Axum integration for `discord_auth`
//!
//! Provides the login, callback and logout routes plus an [`AuthUser`]
//! extractor for handlers that need the logged-in visitor.
//!
//! ```no_run
//! use std::sync::Arc;
//! use axum::{Router, routing::get};
//! use discord_auth::AuthContext;
//! use discord_auth_axum::{AuthUser, auth_router};
//!
//! async fn me(user: Option<AuthUser>) -> String {
//!     user.map(|u| u.display_name()).unwrap_or_else(|| "anonymous".to_string())
//! }
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let ctx = Arc::new(AuthContext::from_env()?);
//! let app = Router::new()
//!     .route("/me", get(me))
//!     .with_state(ctx.clone())
//!     .merge(auth_router(ctx));
//! # Ok(())
//! # }
//! ```

mod error;
mod oauth2;
mod router;
mod session;

pub use error::IntoResponseError;
pub use router::{auth_router, auth_router_no_trace};
pub use session::{AuthRedirect, AuthUser};

// Re-export the core types handlers usually need
pub use discord_auth::{AuthContext, Profile};
