//! Shared types and HTTP plumbing for the RadioShark control panel.

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod platform;
pub mod protocol;
pub mod response;

pub use error::ProtoError;
