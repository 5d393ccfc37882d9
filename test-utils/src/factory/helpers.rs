//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique IDs in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates stream settings for a fresh guild together with `role_count` lock roles.
///
/// The settings row gets a lock channel so that the roles are meaningful to the
/// visibility step.
///
/// # Arguments
/// - `db` - Database connection
/// - `role_count` - Number of lock roles to attach
///
/// # Returns
/// - `Ok((settings, roles))` - Created settings row and its lock roles
/// - `Err(DbErr)` - Database error during creation
pub async fn create_settings_with_lock_roles(
    db: &DatabaseConnection,
    role_count: usize,
) -> Result<
    (
        entity::stream_settings::Model,
        Vec<entity::stream_lock_role::Model>,
    ),
    DbErr,
> {
    let settings = crate::factory::stream_settings::StreamSettingsFactory::new(db)
        .lock_channel_id(Some(next_id().to_string()))
        .build()
        .await?;

    let mut roles = Vec::with_capacity(role_count);
    for _ in 0..role_count {
        roles.push(crate::factory::stream_lock_role::create_lock_role(db, &settings.guild_id).await?);
    }

    Ok((settings, roles))
}
