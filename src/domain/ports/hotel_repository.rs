use async_trait::async_trait;

use crate::domain::entities::{
    Hotel, HotelChanges, HotelFilter, NewHotel, NewRoom, Pagination, Room,
};
use crate::domain::errors::DomainResult;

#[async_trait]
pub trait HotelRepository: Send + Sync {
    async fn create_hotel(&self, hotel: &NewHotel) -> DomainResult<Hotel>;
    async fn get_hotel_by_id(&self, id: i64) -> DomainResult<Option<Hotel>>;
    /// Matching hotels ordered by id, one page at a time.
    async fn list_hotels(
        &self,
        filter: &HotelFilter,
        pagination: Pagination,
    ) -> DomainResult<Vec<Hotel>>;
    /// Applies the present fields and refreshes `updated_at`. Returns `None` if the hotel is gone.
    async fn update_hotel(&self, id: i64, changes: &HotelChanges) -> DomainResult<Option<Hotel>>;
    /// Returns `false` when nothing was deleted.
    async fn delete_hotel(&self, id: i64) -> DomainResult<bool>;

    async fn create_room(&self, room: &NewRoom) -> DomainResult<Room>;
    /// Rooms of every listed hotel, ordered by hotel then room id.
    async fn list_rooms_for_hotels(&self, hotel_ids: &[i64]) -> DomainResult<Vec<Room>>;
}
