//! Infrastructure layer - Store implementations and services

pub mod library;
pub mod logging;
pub mod role;
pub mod user;
