//! Test fixtures providing reusable test data without database insertion.
//!
//! Unlike factories, fixtures do NOT insert data into the database. They describe
//! external payloads (Twitch Helix bodies) and in-memory entity models.
//!
//! # Example
//!
//! ```rust,ignore
//! use test_utils::fixture;
//!
//! let body = fixture::helix::live_body("40952121085", "some_streamer");
//! let offline = fixture::helix::offline_body();
//! ```

pub mod helix;
pub mod stream_settings;
