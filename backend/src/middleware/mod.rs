//! Request extractors shared by handlers

pub mod auth;

pub use auth::Identity;
