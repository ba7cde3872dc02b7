//! Core business logic for GuardMoGo.

pub mod phone;
pub mod services;

pub use services::*;
