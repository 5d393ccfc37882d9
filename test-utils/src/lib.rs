//! Echelon Test Utils
//!
//! Provides shared testing utilities for the stream reconciler. This crate offers a builder
//! pattern for creating test contexts with in-memory SQLite databases, factories that insert
//! stream settings rows, and fixtures describing Twitch Helix payloads.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment containing the database connection
//! - **TestError**: Error types that can occur during test setup
//! - **factory**: Inserts stream settings and lock roles with sensible defaults
//! - **fixture**: In-memory Helix response bodies (no database)
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//!
//! #[tokio::test]
//! async fn test_settings() -> Result<(), TestError> {
//!     let test = TestBuilder::new().with_stream_tables().build().await?;
//!
//!     let db = test.db.unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod fixture;
