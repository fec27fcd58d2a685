use crate::entities::{locations, prelude::*};
use crate::models::Location;
use anyhow::Result;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tracing::info;

/// Repository for the root location records. Lookups key by the raw search
/// text; rows have no TTL and are never updated in place.
pub struct LocationRepository {
    conn: DatabaseConnection,
}

impl LocationRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn find_by_query(&self, search_query: &str) -> Result<Option<Location>> {
        let row = Locations::find()
            .filter(locations::Column::SearchQuery.eq(search_query))
            .one(&self.conn)
            .await?;

        Ok(row.map(Location::from))
    }

    /// Insert a resolved location and return the generated id.
    pub async fn insert(&self, location: &Location) -> Result<i32> {
        let active_model = locations::ActiveModel {
            search_query: Set(location.search_query.clone()),
            formatted_query: Set(location.formatted_query.clone()),
            latitude: Set(location.latitude),
            longitude: Set(location.longitude),
            ..Default::default()
        };

        let res = Locations::insert(active_model).exec(&self.conn).await?;
        info!(
            "Stored location '{}' as id {}",
            location.search_query, res.last_insert_id
        );
        Ok(res.last_insert_id)
    }
}
