use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(skylift_api_migration::Migrator).await;
}
