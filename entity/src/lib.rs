//! SeaORM entity definitions for the stream reconciler's persisted state.

pub mod prelude;

pub mod stream_lock_role;
pub mod stream_settings;
