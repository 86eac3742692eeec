//! Client operations
//!
//! - `session`: login, version probe
//! - `resources`: generic create / get / update / delete over any [`Entity`](resources::Entity)

pub mod resources;
pub mod session;
