use super::*;

/// Tests replacing the lock roles of a guild.
///
/// Expected: Ok with only the new roles stored
#[tokio::test]
async fn replaces_existing_roles() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_stream_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (settings, _) = factory::helpers::create_settings_with_lock_roles(db, 3).await?;
    let repo = StreamSettingsRepository::new(db);

    repo.set_lock_roles(&settings.guild_id, &["10".to_string(), "11".to_string()])
        .await?;

    let mut roles = repo
        .get_config(&settings.guild_id)
        .await?
        .unwrap()
        .lock_role_ids;
    roles.sort();
    assert_eq!(roles, vec!["10".to_string(), "11".to_string()]);

    Ok(())
}

/// Tests that duplicate role ids are stored once.
///
/// Expected: Ok with a single row
#[tokio::test]
async fn stores_duplicates_once() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_stream_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let settings = factory::create_stream_settings(db).await?;

    StreamSettingsRepository::new(db)
        .set_lock_roles(&settings.guild_id, &["10".to_string(), "10".to_string()])
        .await?;

    assert_eq!(entity::prelude::StreamLockRole::find().count(db).await?, 1);

    Ok(())
}

/// Tests clearing all lock roles.
///
/// Expected: Ok with no rows left for the guild
#[tokio::test]
async fn clears_roles_with_empty_list() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_stream_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (settings, _) = factory::helpers::create_settings_with_lock_roles(db, 2).await?;

    StreamSettingsRepository::new(db)
        .set_lock_roles(&settings.guild_id, &[])
        .await?;

    assert_eq!(entity::prelude::StreamLockRole::find().count(db).await?, 0);

    Ok(())
}
