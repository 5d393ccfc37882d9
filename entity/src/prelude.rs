pub use super::stream_lock_role::Entity as StreamLockRole;
pub use super::stream_settings::Entity as StreamSettings;
