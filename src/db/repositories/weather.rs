use crate::entities::{prelude::*, weather_reports};
use crate::models::WeatherDay;
use anyhow::Result;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

pub struct WeatherRepository {
    conn: DatabaseConnection,
}

impl WeatherRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn for_location(&self, location_id: i32) -> Result<Vec<WeatherDay>> {
        let rows = WeatherReports::find()
            .filter(weather_reports::Column::LocationId.eq(location_id))
            .order_by_asc(weather_reports::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(WeatherDay::from).collect())
    }

    pub async fn insert_many(&self, days: &[WeatherDay]) -> Result<()> {
        let models = days.iter().map(|d| weather_reports::ActiveModel {
            forecast: Set(d.forecast.clone()),
            time: Set(d.time.clone()),
            created_at: Set(d.created_at),
            location_id: Set(d.location_id),
            ..Default::default()
        });

        WeatherReports::insert_many(models).exec(&self.conn).await?;
        Ok(())
    }

    /// Bulk delete of the whole batch for a location; there is no row-level
    /// eviction within a category.
    pub async fn evict(&self, location_id: i32) -> Result<u64> {
        let res = WeatherReports::delete_many()
            .filter(weather_reports::Column::LocationId.eq(location_id))
            .exec(&self.conn)
            .await?;

        Ok(res.rows_affected)
    }
}
