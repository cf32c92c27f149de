//! Images migration.
//!
//! Creates the images table holding each upload's bytes and metadata.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(IMAGES_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS images;").await?;
        Ok(())
    }
}

const IMAGES_SQL: &str = r"
-- One row per upload; rows are inserted and read, never updated
CREATE TABLE IF NOT EXISTS images (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL,
    content_type TEXT NOT NULL,
    data BYTEA NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- List endpoint reads in insertion order
CREATE INDEX IF NOT EXISTS idx_images_created ON images(created_at, id);
";
