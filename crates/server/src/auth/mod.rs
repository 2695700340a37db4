//! Session-based authentication.
//!
//! This module provides:
//! - register/login/logout handlers
//! - the `require_session` guard for protecting routes
//! - cookie parsing and construction for the session token

mod handlers;
mod middleware;

pub use handlers::{login, login_form, logout, register, register_form};
pub use middleware::{current_session, require_session};
