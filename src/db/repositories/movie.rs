use crate::entities::{movies, prelude::*};
use crate::models::Movie;
use anyhow::Result;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

pub struct MovieRepository {
    conn: DatabaseConnection,
}

impl MovieRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn for_location(&self, location_id: i32) -> Result<Vec<Movie>> {
        let rows = Movies::find()
            .filter(movies::Column::LocationId.eq(location_id))
            .order_by_asc(movies::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Movie::from).collect())
    }

    pub async fn insert_many(&self, entries: &[Movie]) -> Result<()> {
        let models = entries.iter().map(|m| movies::ActiveModel {
            title: Set(m.title.clone()),
            overview: Set(m.overview.clone()),
            average_votes: Set(m.average_votes),
            total_votes: Set(m.total_votes),
            image_url: Set(m.image_url.clone()),
            popularity: Set(m.popularity),
            released_on: Set(m.released_on.clone()),
            created_at: Set(m.created_at),
            location_id: Set(m.location_id),
            ..Default::default()
        });

        Movies::insert_many(models).exec(&self.conn).await?;
        Ok(())
    }

    pub async fn evict(&self, location_id: i32) -> Result<u64> {
        let res = Movies::delete_many()
            .filter(movies::Column::LocationId.eq(location_id))
            .exec(&self.conn)
            .await?;

        Ok(res.rows_affected)
    }
}
