use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "stream_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub guild_id: String,
    pub streamer_login: String,
    pub notification_channel_id: String,
    pub lock_channel_id: Option<String>,
    pub last_stream_id: Option<String>,
    pub log_channel_id: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::stream_lock_role::Entity")]
    StreamLockRole,
}

impl Related<super::stream_lock_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StreamLockRole.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
