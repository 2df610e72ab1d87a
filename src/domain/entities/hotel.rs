use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: i64,
    pub name: String,
    pub country: String,
    pub city: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub is_available: bool,
    pub images: Vec<String>,
    pub description: String,
    pub rating: f64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: i64,
    pub hotel_id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub room_type: String,
    pub description: String,
    pub price: f64,
    pub is_available: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Projection of a room used when listing hotels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSummary {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub room_type: String,
    pub price: f64,
    pub is_available: bool,
}

impl From<Room> for RoomSummary {
    fn from(room: Room) -> Self {
        Self {
            id: room.id,
            name: room.name,
            room_type: room.room_type,
            price: room.price,
            is_available: room.is_available,
        }
    }
}

/// Hotel together with its rooms; `R` is either [`Room`] or [`RoomSummary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelWithRooms<R> {
    #[serde(flatten)]
    pub hotel: Hotel,
    pub rooms: Vec<R>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewHotel {
    pub name: String,
    pub country: String,
    pub city: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub is_available: bool,
    pub images: Vec<String>,
    pub description: String,
    pub rating: f64,
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HotelChanges {
    pub name: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_available: Option<bool>,
    pub images: Option<Vec<String>>,
    pub description: Option<String>,
    pub rating: Option<f64>,
}

impl HotelChanges {
    pub fn is_empty(&self) -> bool {
        *self == HotelChanges::default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRoom {
    pub hotel_id: i64,
    pub name: String,
    pub room_type: String,
    pub description: String,
    pub price: f64,
    pub is_available: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HotelFilter {
    pub country: Option<String>,
    pub city: Option<String>,
    pub is_available: Option<bool>,
    pub min_rating: Option<f64>,
}

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Pagination {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(DEFAULT_PAGE).max(1),
            limit: limit.unwrap_or(DEFAULT_LIMIT).max(1),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None, None)
    }
}
