//! Caller identification
//!
//! Bearer API keys are hashed and looked up in the user store.

pub mod api_key;

pub use api_key::{auth_middleware, optional_auth_middleware};
