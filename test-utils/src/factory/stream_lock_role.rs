//! Lock role factory for attaching visibility-restricted roles to a guild's settings.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating lock role rows.
///
/// The referenced guild must already have a stream settings row.
pub struct StreamLockRoleFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    role_id: String,
}

impl<'a> StreamLockRoleFactory<'a> {
    /// Creates a factory for `guild_id` with an auto-generated role id.
    pub fn new(db: &'a DatabaseConnection, guild_id: impl Into<String>) -> Self {
        Self {
            db,
            guild_id: guild_id.into(),
            role_id: (next_id() + 2_000_000).to_string(),
        }
    }

    pub fn role_id(mut self, role_id: impl Into<String>) -> Self {
        self.role_id = role_id.into();
        self
    }

    /// Builds and inserts the lock role row.
    ///
    /// # Returns
    /// - `Ok(entity::stream_lock_role::Model)` - Created row
    /// - `Err(DbErr)` - Database error during insert (e.g. unknown guild)
    pub async fn build(self) -> Result<entity::stream_lock_role::Model, DbErr> {
        entity::stream_lock_role::ActiveModel {
            id: ActiveValue::NotSet,
            guild_id: ActiveValue::Set(self.guild_id),
            role_id: ActiveValue::Set(self.role_id),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a lock role with a generated role id for `guild_id`.
pub async fn create_lock_role(
    db: &DatabaseConnection,
    guild_id: &str,
) -> Result<entity::stream_lock_role::Model, DbErr> {
    StreamLockRoleFactory::new(db, guild_id).build().await
}
