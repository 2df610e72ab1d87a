use hotel_directory::application::services::HotelService;
use hotel_directory::domain::entities::{Hotel, NewHotel, NewRoom, Room};
use hotel_directory::domain::ports::HotelRepository;
use hotel_directory::infrastructure::persistence::Database;
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

pub struct TestDatabase {
    db: Database,
    path: PathBuf,
}

impl TestDatabase {
    pub fn db(&self) -> &Database {
        &self.db
    }
}

/// Fresh file-backed SQLite database per test (unique name for parallel runs)
pub async fn setup_test_db() -> TestDatabase {
    let path = std::env::temp_dir().join(format!("hotel_test_{}.db", Uuid::new_v4()));
    let db_url = format!("sqlite://{}?mode=rwc", path.display());

    let db = Database::connect(&db_url)
        .await
        .expect("Failed to connect to test database");
    db.run_migrations()
        .await
        .expect("Failed to run migrations");

    TestDatabase { db, path }
}

pub async fn teardown_test_db(test_db: TestDatabase) {
    test_db.db.close().await;
    for suffix in ["", "-wal", "-shm"] {
        let mut file = test_db.path.clone().into_os_string();
        file.push(suffix);
        let _ = std::fs::remove_file(file);
    }
}

pub fn sample_hotel(name: &str) -> NewHotel {
    NewHotel {
        name: name.to_string(),
        country: "Portugal".to_string(),
        city: "Lisbon".to_string(),
        address: "Rua Augusta 1".to_string(),
        latitude: 38.71,
        longitude: -9.14,
        is_available: true,
        images: vec!["front.jpg".to_string()],
        description: "Riverside hotel".to_string(),
        rating: 4.0,
    }
}

pub async fn seed_hotel(db: &Database, hotel: NewHotel) -> Hotel {
    db.create_hotel(&hotel)
        .await
        .expect("Failed to seed hotel")
}

pub fn sample_room(hotel_id: i64, name: &str, price: f64) -> NewRoom {
    NewRoom {
        hotel_id,
        name: name.to_string(),
        room_type: "double".to_string(),
        description: "Two beds".to_string(),
        price,
        is_available: true,
    }
}

/// Rooms have no HTTP routes; they are attached through the service.
pub async fn seed_room(db: &Database, hotel_id: i64, name: &str, price: f64) -> Room {
    HotelService::new(Arc::new(db.clone()))
        .add_room(sample_room(hotel_id, name, price))
        .await
        .expect("Failed to seed room")
}
