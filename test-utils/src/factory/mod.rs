//! Factory methods for creating test data.
//!
//! Each entity has a `Factory` struct for customization and a `create_*` convenience
//! function for quick default creation. Factories insert rows into the database.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let settings = factory::create_stream_settings(&db).await?;
//!
//! let live = factory::stream_settings::StreamSettingsFactory::new(&db)
//!     .streamer_login("some_streamer")
//!     .last_stream_id(Some("40952121085".to_string()))
//!     .build()
//!     .await?;
//!
//! let (settings, roles) = factory::helpers::create_settings_with_lock_roles(&db, 2).await?;
//! ```
//!
//! # Available Factories
//!
//! - `stream_settings` - Create stream settings rows
//! - `stream_lock_role` - Create lock role rows for a guild
//! - `helpers` - Id generation and multi-entity shortcuts

pub mod helpers;
pub mod stream_lock_role;
pub mod stream_settings;

pub use stream_lock_role::create_lock_role;
pub use stream_settings::create_stream_settings;
