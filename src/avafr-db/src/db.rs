use anyhow::Context;
use avafr_migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

#[derive(Clone)]
pub struct DatabaseHandler {
    pub(crate) db: DatabaseConnection,
}

impl DatabaseHandler {
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Connects and brings the schema up to date.
    pub async fn new<C>(path: C) -> anyhow::Result<Self>
    where
        C: Into<ConnectOptions>,
    {
        let db = Database::connect(path)
            .await
            .context("Unable to connect to db")?;

        Migrator::up(&db, None)
            .await
            .context("Error running migrations")?;

        Ok(Self { db })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let db = DatabaseHandler::new("sqlite::memory:").await.unwrap();
        Migrator::up(db.connection(), None).await.unwrap();

        let status = Migrator::get_pending_migrations(db.connection())
            .await
            .unwrap();
        assert!(status.is_empty());
    }
}
