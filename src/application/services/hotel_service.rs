use crate::domain::{
    entities::{
        Hotel, HotelChanges, HotelFilter, HotelWithRooms, NewHotel, NewRoom, Pagination, Room,
        RoomSummary,
    },
    errors::{DomainError, DomainResult},
    ports::HotelRepository,
};
use std::collections::HashMap;
use std::sync::Arc;

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 5.0;

#[derive(Clone)]
pub struct HotelService {
    hotel_repo: Arc<dyn HotelRepository>,
}

impl HotelService {
    pub fn new(hotel_repo: Arc<dyn HotelRepository>) -> Self {
        Self { hotel_repo }
    }

    pub async fn create_hotel(&self, hotel: NewHotel) -> DomainResult<HotelWithRooms<Room>> {
        check_rating(hotel.rating)?;
        check_coordinates(Some(hotel.latitude), Some(hotel.longitude))?;

        let hotel = self.hotel_repo.create_hotel(&hotel).await?;
        tracing::info!("Hotel created: id={}, name={}", hotel.id, hotel.name);

        Ok(HotelWithRooms {
            hotel,
            rooms: Vec::new(),
        })
    }

    /// Page of matching hotels, each with its rooms reduced to [`RoomSummary`].
    pub async fn list_hotels(
        &self,
        filter: &HotelFilter,
        pagination: Pagination,
    ) -> DomainResult<Vec<HotelWithRooms<RoomSummary>>> {
        let hotels = self.hotel_repo.list_hotels(filter, pagination).await?;
        if hotels.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = hotels.iter().map(|h| h.id).collect();
        let mut rooms_by_hotel: HashMap<i64, Vec<RoomSummary>> = HashMap::new();
        for room in self.hotel_repo.list_rooms_for_hotels(&ids).await? {
            rooms_by_hotel
                .entry(room.hotel_id)
                .or_default()
                .push(RoomSummary::from(room));
        }

        Ok(hotels
            .into_iter()
            .map(|hotel| {
                let rooms = rooms_by_hotel.remove(&hotel.id).unwrap_or_default();
                HotelWithRooms { hotel, rooms }
            })
            .collect())
    }

    pub async fn get_hotel(&self, id: i64) -> DomainResult<HotelWithRooms<Room>> {
        let hotel = self.find_hotel(id).await?;
        let rooms = self.hotel_repo.list_rooms_for_hotels(&[hotel.id]).await?;
        Ok(HotelWithRooms { hotel, rooms })
    }

    pub async fn hotel_exists(&self, id: i64) -> DomainResult<bool> {
        Ok(self.hotel_repo.get_hotel_by_id(id).await?.is_some())
    }

    pub async fn update_hotel(
        &self,
        id: i64,
        changes: HotelChanges,
    ) -> DomainResult<HotelWithRooms<Room>> {
        if let Some(rating) = changes.rating {
            check_rating(rating)?;
        }
        check_coordinates(changes.latitude, changes.longitude)?;

        // Existence is checked up front so an absent hotel is always NotFound.
        self.find_hotel(id).await?;

        let hotel = self
            .hotel_repo
            .update_hotel(id, &changes)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!("Hotel updated: id={}", id);

        let rooms = self.hotel_repo.list_rooms_for_hotels(&[hotel.id]).await?;
        Ok(HotelWithRooms { hotel, rooms })
    }

    pub async fn delete_hotel(&self, id: i64) -> DomainResult<()> {
        self.find_hotel(id).await?;

        if !self.hotel_repo.delete_hotel(id).await? {
            return Err(not_found(id));
        }
        tracing::info!("Hotel deleted: id={}", id);
        Ok(())
    }

    pub async fn add_room(&self, room: NewRoom) -> DomainResult<Room> {
        if !(room.price >= 0.0) {
            return Err(DomainError::ValidationError(
                "Price must be a non-negative number".to_string(),
            ));
        }
        self.find_hotel(room.hotel_id).await?;

        let room = self.hotel_repo.create_room(&room).await?;
        tracing::info!("Room created: id={}, hotel_id={}", room.id, room.hotel_id);
        Ok(room)
    }

    async fn find_hotel(&self, id: i64) -> DomainResult<Hotel> {
        self.hotel_repo
            .get_hotel_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }
}

fn not_found(id: i64) -> DomainError {
    DomainError::NotFound(format!("Hotel with id {} not found", id))
}

fn check_rating(rating: f64) -> DomainResult<()> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(DomainError::ValidationError(
            "Rating must be between 0 and 5".to_string(),
        ));
    }
    Ok(())
}

fn check_coordinates(latitude: Option<f64>, longitude: Option<f64>) -> DomainResult<()> {
    if latitude.is_some_and(|lat| !(-90.0..=90.0).contains(&lat)) {
        return Err(DomainError::ValidationError(
            "Latitude must be between -90 and 90".to_string(),
        ));
    }
    if longitude.is_some_and(|lng| !(-180.0..=180.0).contains(&lng)) {
        return Err(DomainError::ValidationError(
            "Longitude must be between -180 and 180".to_string(),
        ));
    }
    Ok(())
}
