//! Domain models and parameter types.
//!
//! Domain models are converted from entity models at the repository boundary and from
//! Twitch wire payloads at the client boundary. The reconciler works on these types only.

pub mod stream;
pub mod twitch;
