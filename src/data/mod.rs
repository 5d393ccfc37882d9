//! Database repository layer.
//!
//! Repositories use SeaORM entity models internally and return domain models so the service
//! layer never sees entity types. The reconciler reaches the database only through the
//! `SettingsStore` trait, which lets tests substitute an in-memory store.

pub mod stream_settings;
