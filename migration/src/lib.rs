pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_stream_settings_table;
mod m20260301_000002_create_stream_lock_role_table;
mod m20260308_000003_add_log_channel_to_stream_settings;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_stream_settings_table::Migration),
            Box::new(m20260301_000002_create_stream_lock_role_table::Migration),
            Box::new(m20260308_000003_add_log_channel_to_stream_settings::Migration),
        ]
    }
}
