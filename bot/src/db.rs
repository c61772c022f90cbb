//! Database connection and schema initialization

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};

use crate::entity::{budgets, categories, reports, transactions, users};

/// Connect to PostgreSQL. `sqlx_logging` mirrors the DEBUG config flag.
pub async fn connect(database_url: &str, sqlx_logging: bool) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url.to_string());
    options.sqlx_logging(sqlx_logging);
    Database::connect(options).await
}

/// Create all tables derived from the entity definitions, skipping the ones
/// that already exist. Called at startup.
pub async fn create_tables(db: &DatabaseConnection) -> Result<(), DbErr> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut statements = [
        schema.create_table_from_entity(users::Entity),
        schema.create_table_from_entity(categories::Entity),
        schema.create_table_from_entity(transactions::Entity),
        schema.create_table_from_entity(budgets::Entity),
        schema.create_table_from_entity(reports::Entity),
    ];

    for statement in &mut statements {
        statement.if_not_exists();
        db.execute(builder.build(&*statement)).await?;
    }

    Ok(())
}
