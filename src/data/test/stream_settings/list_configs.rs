use super::*;

/// Tests listing when no guild has enabled stream watching.
///
/// Expected: Ok with empty list
#[tokio::test]
async fn returns_empty_list_without_settings() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_stream_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let configs = StreamSettingsRepository::new(db).list_configs().await?;

    assert!(configs.is_empty());

    Ok(())
}

/// Tests that every guild is listed with its own lock roles.
///
/// Verifies roles are attached to the guild they belong to and not leaked
/// into other guilds' configs.
///
/// Expected: Ok with one config per guild, roles grouped per guild
#[tokio::test]
async fn lists_each_guild_with_its_lock_roles() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_stream_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (locked, roles) = factory::helpers::create_settings_with_lock_roles(db, 2).await?;
    let plain = factory::create_stream_settings(db).await?;

    let configs = StreamSettingsRepository::new(db).list_configs().await?;

    assert_eq!(configs.len(), 2);

    let locked_config = configs
        .iter()
        .find(|c| c.guild_id == locked.guild_id)
        .unwrap();
    let mut expected_roles: Vec<String> = roles.into_iter().map(|r| r.role_id).collect();
    let mut actual_roles = locked_config.lock_role_ids.clone();
    expected_roles.sort();
    actual_roles.sort();
    assert_eq!(actual_roles, expected_roles);
    assert_eq!(locked_config.lock_channel_id, locked.lock_channel_id);

    let plain_config = configs
        .iter()
        .find(|c| c.guild_id == plain.guild_id)
        .unwrap();
    assert!(plain_config.lock_role_ids.is_empty());
    assert!(plain_config.lock_channel_id.is_none());

    Ok(())
}

/// Tests that the persisted stream id is carried into the listed config.
///
/// Expected: Ok with last_stream_id preserved
#[tokio::test]
async fn includes_last_stream_id() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_stream_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::stream_settings::StreamSettingsFactory::new(db)
        .last_stream_id(Some("40952121085".to_string()))
        .build()
        .await?;

    let configs = StreamSettingsRepository::new(db).list_configs().await?;

    assert_eq!(configs.len(), 1);
    assert_eq!(configs[0].last_stream_id, Some("40952121085".to_string()));

    Ok(())
}
