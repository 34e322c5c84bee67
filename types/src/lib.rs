//! Common types shared by the parlor engine and its hosting service.

pub mod api;
pub mod casino;

pub use api::*;
pub use casino::GameError;
