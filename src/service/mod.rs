//! Service layer for business logic and orchestration.
//!
//! - **twitch** - access tokens and live-status lookups against Twitch Helix
//! - **announcer** - Discord side effects (channel visibility, banner, announcement)
//! - **stream** - the reconciliation loop tying settings, status and side effects together

pub mod announcer;
pub mod stream;
pub mod twitch;
