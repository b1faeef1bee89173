use super::error::Error;
use entity::connections::{ActiveModel, Column, Entity, Model};
use entity::ConnectionId;
use log::debug;
use sea_orm::{entity::prelude::*, sea_query::OnConflict, ActiveValue::Set, DatabaseConnection};

/// Inserts a connection record, overwriting any existing record with the same id.
pub async fn put(db: &DatabaseConnection, connection_id: &str) -> Result<(), Error> {
    debug!("Putting connection record: {connection_id}");

    let active_model = ActiveModel {
        connection_id: Set(connection_id.to_owned()),
    };

    Entity::insert(active_model)
        .on_conflict(
            OnConflict::column(Column::ConnectionId)
                .update_column(Column::ConnectionId)
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    Ok(())
}

/// Deletes the connection record if present. Deleting an absent id is not an error.
pub async fn delete(db: &DatabaseConnection, connection_id: &str) -> Result<(), Error> {
    let result = Entity::delete_by_id(connection_id.to_owned())
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        debug!("No connection record to delete for {connection_id}");
    } else {
        debug!("Deleted connection record: {connection_id}");
    }

    Ok(())
}

/// Returns every registered connection record, in no particular order.
pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<Model>, Error> {
    Ok(Entity::find().all(db).await?)
}

/// Returns every registered connection id, in no particular order.
pub async fn find_all_ids(db: &DatabaseConnection) -> Result<Vec<ConnectionId>, Error> {
    Ok(find_all(db)
        .await?
        .into_iter()
        .map(|model| model.connection_id)
        .collect())
}
