// Adapters layer: HTTP implementations of the domain ports against the group platform.

pub mod credential;
pub mod directory;
pub mod http;
pub mod membership;
pub mod mutator;
pub mod roles;

pub use http::{PlatformClient, PlatformSettings};
