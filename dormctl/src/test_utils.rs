//! Test utilities for integration testing.

use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};

use axum_test::TestServer;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::config::{Config, PoolSettings};
use crate::db::handlers::repository::Repository;
use crate::db::handlers::{Payments, Rooms, Settlements, Students};
use crate::db::models::payments::{PaymentCreateDBRequest, PaymentDBResponse};
use crate::db::models::rooms::{RoomCreateDBRequest, RoomDBResponse};
use crate::db::models::settlements::{SettlementCreateDBRequest, SettlementDBResponse};
use crate::db::models::students::{StudentCreateDBRequest, StudentDBResponse};
use crate::types::StudentId;

/// Monotonic counter so fixture phones and passports never collide within a test
static FIXTURE_SEQ: AtomicU32 = AtomicU32::new(0);

pub async fn create_test_app(pool: PgPool) -> TestServer {
    let config = create_test_config();

    let app = crate::Application::new_with_pool(config, Some(pool))
        .await
        .expect("Failed to create application");

    app.into_test_server()
}

pub fn create_test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: None,
        database: crate::config::DatabaseSettings {
            // Tests bring their own pool; the URL is never dialed
            url: "postgres://unused".to_string(),
            pool: PoolSettings {
                max_connections: 1,
                min_connections: 1,
                ..Default::default()
            },
        },
        // Tests create the rooms they need explicitly
        rooms: vec![],
        cors: crate::config::CorsConfig::default(),
    }
}

pub async fn create_test_student(pool: &PgPool, name: &str) -> StudentDBResponse {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let mut students_repo = Students::new(&mut conn);
    let n = FIXTURE_SEQ.fetch_add(1, Ordering::Relaxed);

    let student_create = StudentCreateDBRequest {
        full_name: name.to_string(),
        birth_date: NaiveDate::from_ymd_opt(2004, 2, 11).unwrap(),
        gender: "female".to_string(),
        phone: format!("+380501{n:06}"),
        university_group: "KN-21".to_string(),
        passport_number: format!("KB{n:06}"),
    };

    students_repo.create(&student_create).await.expect("Failed to create test student")
}

pub async fn create_test_room(pool: &PgPool, number: &str, capacity: i32) -> RoomDBResponse {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let mut rooms_repo = Rooms::new(&mut conn);

    let room_create = RoomCreateDBRequest {
        room_number: number.to_string(),
        capacity,
    };

    rooms_repo.create(&room_create).await.expect("Failed to create test room")
}

pub async fn create_test_settlement(pool: &PgPool, student_id: StudentId, room_number: &str) -> SettlementDBResponse {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let mut settlements_repo = Settlements::new(&mut conn);

    let settlement_create = SettlementCreateDBRequest {
        student_id,
        room_number: room_number.to_string(),
        settle_date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
    };

    settlements_repo
        .assign(&settlement_create)
        .await
        .expect("Failed to create test settlement")
}

pub async fn create_test_payment(pool: &PgPool, student_id: StudentId, amount: &str) -> PaymentDBResponse {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let mut payments_repo = Payments::new(&mut conn);

    let payment_create = PaymentCreateDBRequest {
        student_id,
        payment_date: NaiveDate::from_ymd_opt(2024, 9, 5).unwrap(),
        amount: Decimal::from_str(amount).expect("Invalid test amount"),
        payment_method: "card".to_string(),
    };

    payments_repo.create(&payment_create).await.expect("Failed to create test payment")
}
