use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Deserializer};
use validator::Validate;

use crate::{
    domain::{
        entities::{HotelChanges, HotelFilter, HotelWithRooms, NewHotel, Pagination, Room, RoomSummary},
        errors::DomainError,
    },
    infrastructure::http::{
        envelope::Envelope,
        extractors::{ValidatedJson, ValidatedJsonOrDefault, ValidatedPath, ValidatedQuery},
        middleware::{ApiError, ApiResult, AppState},
    },
};

pub const NOT_FOUND_MESSAGE: &str = "Hotel not found";

/// Trim surrounding whitespace while decoding, so rules see the stored value.
fn trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.map(|s| s.trim().to_string()))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateHotelRequest {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(required(message = "Name is required"), length(min = 1, message = "Name is required"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(
        required(message = "Country is required"),
        length(min = 1, message = "Country is required")
    )]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(required(message = "City is required"), length(min = 1, message = "City is required"))]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(
        required(message = "Address is required"),
        length(min = 1, message = "Address is required")
    )]
    pub address: Option<String>,
    #[validate(
        required(message = "Latitude must be between -90 and 90"),
        range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90")
    )]
    pub latitude: Option<f64>,
    #[validate(
        required(message = "Longitude must be between -180 and 180"),
        range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180")
    )]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(
        required(message = "Description is required"),
        length(min = 1, message = "Description is required")
    )]
    pub description: Option<String>,
    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    pub rating: Option<f64>,
    pub is_available: Option<bool>,
    pub images: Option<Vec<String>>,
}

impl CreateHotelRequest {
    /// Only meaningful after `validate()` has passed.
    fn into_new_hotel(self) -> NewHotel {
        NewHotel {
            name: self.name.unwrap_or_default(),
            country: self.country.unwrap_or_default(),
            city: self.city.unwrap_or_default(),
            address: self.address.unwrap_or_default(),
            latitude: self.latitude.unwrap_or_default(),
            longitude: self.longitude.unwrap_or_default(),
            is_available: self.is_available.unwrap_or(true),
            images: self.images.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            rating: self.rating.unwrap_or(0.0),
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateHotelRequest {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "Name must be non-empty"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "Country must be non-empty"))]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "City must be non-empty"))]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "Address must be non-empty"))]
    pub address: Option<String>,
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180"))]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "Description must be non-empty"))]
    pub description: Option<String>,
    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    pub rating: Option<f64>,
    pub is_available: Option<bool>,
    pub images: Option<Vec<String>>,
}

impl From<UpdateHotelRequest> for HotelChanges {
    fn from(request: UpdateHotelRequest) -> Self {
        Self {
            name: request.name,
            country: request.country,
            city: request.city,
            address: request.address,
            latitude: request.latitude,
            longitude: request.longitude,
            is_available: request.is_available,
            images: request.images,
            description: request.description,
            rating: request.rating,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ListHotelsQuery {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "Country filter must be non-empty"))]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "City filter must be non-empty"))]
    pub city: Option<String>,
    pub is_available: Option<bool>,
    #[validate(range(min = 0.0, max = 5.0, message = "Minimum rating must be between 0 and 5"))]
    pub min_rating: Option<f64>,
    #[validate(range(min = 1, message = "Page must be a positive integer"))]
    pub page: Option<i64>,
    #[validate(range(min = 1, message = "Limit must be a positive integer"))]
    pub limit: Option<i64>,
}

impl ListHotelsQuery {
    fn into_parts(self) -> (HotelFilter, Pagination) {
        let pagination = Pagination::new(self.page, self.limit);
        let filter = HotelFilter {
            country: self.country,
            city: self.city,
            is_available: self.is_available,
            min_rating: self.min_rating,
        };
        (filter, pagination)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct HotelPath {
    #[validate(range(min = 1, message = "Hotel ID must be a positive integer"))]
    pub id: i64,
}

fn record(operation: &'static str, outcome: &'static str) {
    metrics::counter!("hotel_requests_total", "operation" => operation, "outcome" => outcome)
        .increment(1);
}

/// Map a service failure to the operation's response.
fn failure(operation: &'static str, message: &'static str, err: DomainError) -> ApiError {
    match err {
        DomainError::NotFound(_) => {
            record(operation, "not_found");
            ApiError::NotFound(NOT_FOUND_MESSAGE.to_string())
        }
        DomainError::Internal(detail) => {
            record(operation, "error");
            tracing::error!("{}: {}", message, detail);
            ApiError::Operation {
                message: message.to_string(),
                detail,
            }
        }
        other => {
            record(operation, "rejected");
            other.into()
        }
    }
}

pub async fn create_hotel(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateHotelRequest>,
) -> ApiResult<(StatusCode, Json<Envelope<HotelWithRooms<Room>>>)> {
    let hotel = state
        .hotel_service
        .create_hotel(request.into_new_hotel())
        .await
        .map_err(|e| failure("create", "Error creating hotel", e))?;

    record("create", "ok");
    Ok((
        StatusCode::CREATED,
        Json(Envelope::ok("Hotel created successfully", hotel)),
    ))
}

pub async fn list_hotels(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListHotelsQuery>,
) -> ApiResult<Json<Envelope<Vec<HotelWithRooms<RoomSummary>>>>> {
    let (filter, pagination) = query.into_parts();
    let hotels = state
        .hotel_service
        .list_hotels(&filter, pagination)
        .await
        .map_err(|e| failure("list", "Error fetching hotels", e))?;

    record("list", "ok");
    Ok(Json(Envelope::ok("Hotels retrieved successfully", hotels)))
}

pub async fn get_hotel(
    State(state): State<AppState>,
    ValidatedPath(path): ValidatedPath<HotelPath>,
) -> ApiResult<Json<Envelope<HotelWithRooms<Room>>>> {
    let hotel = state
        .hotel_service
        .get_hotel(path.id)
        .await
        .map_err(|e| failure("get", "Error fetching hotel", e))?;

    record("get", "ok");
    Ok(Json(Envelope::ok("Hotel retrieved successfully", hotel)))
}

/// A missing hotel is reported as 404 before the body is looked at. No body
/// at all is an empty update.
pub async fn update_hotel(
    State(state): State<AppState>,
    ValidatedPath(path): ValidatedPath<HotelPath>,
    payload: Result<ValidatedJsonOrDefault<UpdateHotelRequest>, ApiError>,
) -> ApiResult<Json<Envelope<HotelWithRooms<Room>>>> {
    let exists = state
        .hotel_service
        .hotel_exists(path.id)
        .await
        .map_err(|e| failure("update", "Error updating hotel", e))?;
    if !exists {
        record("update", "not_found");
        return Err(ApiError::NotFound(NOT_FOUND_MESSAGE.to_string()));
    }

    let ValidatedJsonOrDefault(request) = payload.inspect_err(|_| record("update", "rejected"))?;
    let hotel = state
        .hotel_service
        .update_hotel(path.id, request.into())
        .await
        .map_err(|e| failure("update", "Error updating hotel", e))?;

    record("update", "ok");
    Ok(Json(Envelope::ok("Hotel updated successfully", hotel)))
}

pub async fn delete_hotel(
    State(state): State<AppState>,
    ValidatedPath(path): ValidatedPath<HotelPath>,
) -> ApiResult<Json<Envelope>> {
    state
        .hotel_service
        .delete_hotel(path.id)
        .await
        .map_err(|e| failure("delete", "Error deleting hotel", e))?;

    record("delete", "ok");
    Ok(Json(Envelope::done("Hotel deleted successfully")))
}
