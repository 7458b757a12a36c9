//! Caller identity.
//!
//! Authentication happens upstream (gateway or another layer). This module
//! only carries the resulting identity to handlers:
//!
//! ```ignore
//! use axum_helpers::auth::{CallerId, trusted_identity_header};
//!
//! let app = Router::new()
//!     .route("/me", get(|caller: CallerId| async move { caller.0 }))
//!     .layer(axum::middleware::from_fn(trusted_identity_header));
//! ```

pub mod identity;

pub use identity::{CallerId, USER_ID_HEADER, trusted_identity_header};
