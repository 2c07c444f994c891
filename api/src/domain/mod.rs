//! Domain layer
//!
//! Contains forum models and the interfaces around them.
//! - `entities`: Domain models representing core forum concepts
//! - `ports`: Trait definitions for persistence and for the services the
//!   HTTP layer calls

pub mod entities;
pub mod ports;
