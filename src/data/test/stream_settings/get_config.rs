use super::*;

/// Tests fetching settings for a configured guild.
///
/// Expected: Ok(Some) with stored fields
#[tokio::test]
async fn returns_config_for_known_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_stream_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let settings = factory::stream_settings::StreamSettingsFactory::new(db)
        .guild_id("111")
        .streamer_login("some_streamer")
        .notification_channel_id("222")
        .build()
        .await?;
    factory::stream_lock_role::StreamLockRoleFactory::new(db, &settings.guild_id)
        .role_id("333")
        .build()
        .await?;

    let config = StreamSettingsRepository::new(db).get_config("111").await?;

    let config = config.unwrap();
    assert_eq!(config.streamer_login, "some_streamer");
    assert_eq!(config.notification_channel_id, "222");
    assert_eq!(config.lock_role_ids, vec!["333".to_string()]);

    Ok(())
}

/// Tests fetching settings for a guild that never enabled the feature.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_stream_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_stream_settings(db).await?;

    let config = StreamSettingsRepository::new(db).get_config("999999999").await?;

    assert!(config.is_none());

    Ok(())
}

/// Tests that the store seam returns the same data as the repository.
///
/// Expected: Ok(Some) through `DbSettingsStore`
#[tokio::test]
async fn store_delegates_to_repository() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_stream_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let settings = factory::create_stream_settings(db).await?;
    let store = DbSettingsStore::new(db.clone());

    let config = store.get_config(&settings.guild_id).await?;

    assert_eq!(config.unwrap().streamer_login, settings.streamer_login);

    Ok(())
}
