//! HTTP access to the auth backend

pub mod client;

pub use client::{AuthClient, AuthClientBuilder, DEFAULT_SESSION_PATH, error::ClientError};
