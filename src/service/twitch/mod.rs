//! Twitch integration: app access tokens and live-status queries.
//!
//! - `credential` - client-credentials exchange and the shared, single-flight token cache
//! - `helix` - `GET /helix/streams` client normalizing responses into `LiveStatus`
//! - `status` - combines both, refreshing the token once when Helix answers 401

pub mod credential;
pub mod helix;
pub mod status;

#[cfg(test)]
mod test;
