use sea_orm::{Database, DatabaseConnection, DbErr};

use crate::config::DatabaseConfig;

/// Open the connection pool described by `config`.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(config.connect_options()).await?;
    tracing::info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Connected to database"
    );
    Ok(db)
}
