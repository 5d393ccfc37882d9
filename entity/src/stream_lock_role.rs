use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "stream_lock_role")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub guild_id: String,
    pub role_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::stream_settings::Entity",
        from = "Column::GuildId",
        to = "super::stream_settings::Column::GuildId",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    StreamSettings,
}

impl Related<super::stream_settings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StreamSettings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
