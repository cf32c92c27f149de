//! Database migration runner for imagevault.
//!
//! Reads `DATABASE_URL`. Usage:
//!   migrator up      - Create the images table
//!   migrator down    - Drop it again
//!   migrator status  - Show migration status

use sea_orm_migration::prelude::*;
use imagevault_db::migration::Migrator;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // The CLI installs its own tracing subscriber.
    cli::run_cli(Migrator).await;
}
