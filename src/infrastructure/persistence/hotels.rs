use crate::domain::entities::{
    Hotel, HotelChanges, HotelFilter, NewHotel, NewRoom, Pagination, Room,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::HotelRepository;
use crate::infrastructure::persistence::Database;
use sqlx::{
    any::{AnyQueryResult, AnyRow},
    Any, QueryBuilder, Row,
};

fn hotel_from_row(row: &AnyRow) -> DomainResult<Hotel> {
    let images: String = row.try_get("images")?;
    Ok(Hotel {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        country: row.try_get("country")?,
        city: row.try_get("city")?,
        address: row.try_get("address")?,
        latitude: row.try_get("latitude")?,
        longitude: row.try_get("longitude")?,
        is_available: row.try_get::<i64, _>("is_available")? != 0,
        images: serde_json::from_str(&images)?,
        description: row.try_get("description")?,
        rating: row.try_get("rating")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn inserted_id(result: &AnyQueryResult, table: &str) -> DomainResult<i64> {
    result
        .last_insert_id()
        .ok_or_else(|| DomainError::Internal(format!("No row id reported for insert into {}", table)))
}

fn room_from_row(row: &AnyRow) -> DomainResult<Room> {
    Ok(Room {
        id: row.try_get("id")?,
        hotel_id: row.try_get("hotel_id")?,
        name: row.try_get("name")?,
        room_type: row.try_get("type")?,
        description: row.try_get("description")?,
        price: row.try_get("price")?,
        is_available: row.try_get::<i64, _>("is_available")? != 0,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait::async_trait]
impl HotelRepository for Database {
    async fn create_hotel(&self, hotel: &NewHotel) -> DomainResult<Hotel> {
        let now = chrono::Utc::now().to_rfc3339();
        let images = serde_json::to_string(&hotel.images)?;

        let result = sqlx::query(
            "INSERT INTO hotels (name, country, city, address, latitude, longitude,
                                 is_available, images, description, rating, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&hotel.name)
        .bind(&hotel.country)
        .bind(&hotel.city)
        .bind(&hotel.address)
        .bind(hotel.latitude)
        .bind(hotel.longitude)
        .bind(i64::from(hotel.is_available))
        .bind(images)
        .bind(&hotel.description)
        .bind(hotel.rating)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        let id = inserted_id(&result, "hotels")?;
        self.get_hotel_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Hotel {} not found", id)))
    }

    async fn get_hotel_by_id(&self, id: i64) -> DomainResult<Option<Hotel>> {
        let row = sqlx::query(
            "SELECT id, name, country, city, address, latitude, longitude,
                    is_available, images, description, rating, created_at, updated_at
             FROM hotels
             WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(hotel_from_row).transpose()
    }

    async fn list_hotels(
        &self,
        filter: &HotelFilter,
        pagination: Pagination,
    ) -> DomainResult<Vec<Hotel>> {
        let mut builder: QueryBuilder<Any> = QueryBuilder::new(
            "SELECT id, name, country, city, address, latitude, longitude,
                    is_available, images, description, rating, created_at, updated_at
             FROM hotels
             WHERE 1 = 1",
        );

        if let Some(country) = &filter.country {
            builder.push(" AND country = ");
            builder.push_bind(country.clone());
        }
        if let Some(city) = &filter.city {
            builder.push(" AND city = ");
            builder.push_bind(city.clone());
        }
        if let Some(is_available) = filter.is_available {
            builder.push(" AND is_available = ");
            builder.push_bind(i64::from(is_available));
        }
        if let Some(min_rating) = filter.min_rating {
            builder.push(" AND rating >= ");
            builder.push_bind(min_rating);
        }

        builder.push(" ORDER BY id LIMIT ");
        builder.push_bind(pagination.limit);
        builder.push(" OFFSET ");
        builder.push_bind(pagination.offset());

        let rows = builder.build().fetch_all(&self.pool).await?;
        rows.iter().map(hotel_from_row).collect()
    }

    async fn update_hotel(&self, id: i64, changes: &HotelChanges) -> DomainResult<Option<Hotel>> {
        let mut builder: QueryBuilder<Any> = QueryBuilder::new("UPDATE hotels SET ");
        let mut separated = builder.separated(", ");

        if let Some(name) = &changes.name {
            separated.push("name = ");
            separated.push_bind_unseparated(name.clone());
        }
        if let Some(country) = &changes.country {
            separated.push("country = ");
            separated.push_bind_unseparated(country.clone());
        }
        if let Some(city) = &changes.city {
            separated.push("city = ");
            separated.push_bind_unseparated(city.clone());
        }
        if let Some(address) = &changes.address {
            separated.push("address = ");
            separated.push_bind_unseparated(address.clone());
        }
        if let Some(latitude) = changes.latitude {
            separated.push("latitude = ");
            separated.push_bind_unseparated(latitude);
        }
        if let Some(longitude) = changes.longitude {
            separated.push("longitude = ");
            separated.push_bind_unseparated(longitude);
        }
        if let Some(is_available) = changes.is_available {
            separated.push("is_available = ");
            separated.push_bind_unseparated(i64::from(is_available));
        }
        if let Some(images) = &changes.images {
            separated.push("images = ");
            separated.push_bind_unseparated(serde_json::to_string(images)?);
        }
        if let Some(description) = &changes.description {
            separated.push("description = ");
            separated.push_bind_unseparated(description.clone());
        }
        if let Some(rating) = changes.rating {
            separated.push("rating = ");
            separated.push_bind_unseparated(rating);
        }

        let now = chrono::Utc::now().to_rfc3339();
        separated.push("updated_at = ");
        separated.push_bind_unseparated(now);

        builder.push(" WHERE id = ");
        builder.push_bind(id);

        let result = builder.build().execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_hotel_by_id(id).await
    }

    async fn delete_hotel(&self, id: i64) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM hotels WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn create_room(&self, room: &NewRoom) -> DomainResult<Room> {
        let now = chrono::Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO rooms (hotel_id, name, type, description, price, is_available, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(room.hotel_id)
        .bind(&room.name)
        .bind(&room.room_type)
        .bind(&room.description)
        .bind(room.price)
        .bind(i64::from(room.is_available))
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        let id = inserted_id(&result, "rooms")?;
        let row = sqlx::query(
            "SELECT id, hotel_id, name, type, description, price, is_available, created_at, updated_at
             FROM rooms
             WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        room_from_row(&row)
    }

    async fn list_rooms_for_hotels(&self, hotel_ids: &[i64]) -> DomainResult<Vec<Room>> {
        if hotel_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Any> = QueryBuilder::new(
            "SELECT id, hotel_id, name, type, description, price, is_available, created_at, updated_at
             FROM rooms
             WHERE hotel_id IN (",
        );
        let mut separated = builder.separated(", ");
        for id in hotel_ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(") ORDER BY hotel_id, id");

        let rows = builder.build().fetch_all(&self.pool).await?;
        rows.iter().map(room_from_row).collect()
    }
}
