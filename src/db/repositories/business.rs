use crate::entities::{businesses, prelude::*};
use crate::models::Business;
use anyhow::Result;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

pub struct BusinessRepository {
    conn: DatabaseConnection,
}

impl BusinessRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn for_location(&self, location_id: i32) -> Result<Vec<Business>> {
        let rows = Businesses::find()
            .filter(businesses::Column::LocationId.eq(location_id))
            .order_by_asc(businesses::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Business::from).collect())
    }

    pub async fn insert_many(&self, entries: &[Business]) -> Result<()> {
        let models = entries.iter().map(|b| businesses::ActiveModel {
            name: Set(b.name.clone()),
            image_url: Set(b.image_url.clone()),
            price: Set(b.price.clone()),
            rating: Set(b.rating),
            url: Set(b.url.clone()),
            created_at: Set(b.created_at),
            location_id: Set(b.location_id),
            ..Default::default()
        });

        Businesses::insert_many(models).exec(&self.conn).await?;
        Ok(())
    }

    pub async fn evict(&self, location_id: i32) -> Result<u64> {
        let res = Businesses::delete_many()
            .filter(businesses::Column::LocationId.eq(location_id))
            .exec(&self.conn)
            .await?;

        Ok(res.rows_affected)
    }
}
