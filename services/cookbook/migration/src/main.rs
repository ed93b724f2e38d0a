use sea_orm_migration::prelude::*;

use forkful_cookbook_migration::Migrator;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
