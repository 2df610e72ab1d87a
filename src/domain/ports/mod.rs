pub mod hotel_repository;
pub mod identity_provider;

pub use hotel_repository::HotelRepository;
pub use identity_provider::IdentityProvider;
