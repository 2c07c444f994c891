//! Table creation from the entity definitions
//!
//! Used at startup when `AUTO_CREATE_SCHEMA=true` and by the database tests.
//! Existing tables are left untouched.

use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, Schema};

use crate::entity::{article_likes, articles, comments, users};

async fn create_for<E: EntityTrait>(
    db: &DatabaseConnection,
    schema: &Schema,
    entity: E,
) -> Result<(), DbErr> {
    let backend = db.get_database_backend();

    let mut table = schema.create_table_from_entity(entity);
    table.if_not_exists();
    db.execute(backend.build(&table)).await?;

    for mut index in schema.create_index_from_entity(entity) {
        index.if_not_exists();
        db.execute(backend.build(&index)).await?;
    }

    Ok(())
}

/// Create any missing forum tables and their indexes
pub async fn create_missing_tables(db: &DatabaseConnection) -> Result<(), DbErr> {
    let schema = Schema::new(db.get_database_backend());

    create_for(db, &schema, users::Entity).await?;
    create_for(db, &schema, articles::Entity).await?;
    create_for(db, &schema, comments::Entity).await?;
    create_for(db, &schema, article_likes::Entity).await?;

    tracing::info!("Forum tables ready");
    Ok(())
}
