use crate::entities::{events, prelude::*};
use crate::models::Event;
use anyhow::Result;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

pub struct EventRepository {
    conn: DatabaseConnection,
}

impl EventRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn for_location(&self, location_id: i32) -> Result<Vec<Event>> {
        let rows = Events::find()
            .filter(events::Column::LocationId.eq(location_id))
            .order_by_asc(events::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Event::from).collect())
    }

    pub async fn insert_many(&self, entries: &[Event]) -> Result<()> {
        let models = entries.iter().map(|e| events::ActiveModel {
            link: Set(e.link.clone()),
            name: Set(e.name.clone()),
            event_date: Set(e.event_date.clone()),
            summary: Set(e.summary.clone()),
            created_at: Set(e.created_at),
            location_id: Set(e.location_id),
            ..Default::default()
        });

        Events::insert_many(models).exec(&self.conn).await?;
        Ok(())
    }

    pub async fn evict(&self, location_id: i32) -> Result<u64> {
        let res = Events::delete_many()
            .filter(events::Column::LocationId.eq(location_id))
            .exec(&self.conn)
            .await?;

        Ok(res.rows_affected)
    }
}
