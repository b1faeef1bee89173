pub use sea_orm_migration::prelude::*;

mod m20261016_000001_create_connections_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20261016_000001_create_connections_table::Migration)]
    }
}

/// Creates the registry schema if it is missing. Must run before
/// [`Migrator::up`], since the migration bookkeeping table lives in the
/// schema named by the connection's search path.
pub async fn create_schema<C>(db: &C, schema: &str) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    db.execute_unprepared(&create_schema_statement(schema))
        .await?;
    Ok(())
}

fn create_schema_statement(schema: &str) -> String {
    format!(
        "CREATE SCHEMA IF NOT EXISTS \"{}\";",
        schema.replace('"', "\"\"")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_statement_quotes_the_name() {
        assert_eq!(
            create_schema_statement("ws_broadcaster"),
            r#"CREATE SCHEMA IF NOT EXISTS "ws_broadcaster";"#
        );
        assert_eq!(
            create_schema_statement(r#"odd"name"#),
            r#"CREATE SCHEMA IF NOT EXISTS "odd""name";"#
        );
    }
}
