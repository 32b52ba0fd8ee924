//! OpenAPI documentation for the dormitory administration API.
//!
//! The generated spec is served through Scalar at `/docs`. Handler
//! annotations live next to the handlers; this module only assembles them.

use utoipa::OpenApi;

use crate::api;

#[derive(OpenApi)]
#[openapi(
    servers(
        (url = "/api", description = "Dormitory administration API")
    ),
    paths(
        api::handlers::students::list_students,
        api::handlers::students::create_student,
        api::handlers::students::delete_student,
        api::handlers::rooms::list_rooms,
        api::handlers::rooms::list_available_rooms,
        api::handlers::settlements::list_settlements,
        api::handlers::settlements::create_settlement,
        api::handlers::settlements::delete_settlement,
        api::handlers::payments::list_payments,
        api::handlers::payments::list_student_payments,
        api::handlers::payments::create_payment,
        api::handlers::statistics::get_statistics,
    ),
    components(
        schemas(
            api::models::MutationResponse,
            api::models::students::StudentCreate,
            api::models::students::StudentResponse,
            api::models::students::StudentCreatedResponse,
            api::models::rooms::RoomResponse,
            api::models::rooms::AvailableRoomResponse,
            api::models::settlements::SettlementCreate,
            api::models::settlements::SettlementResponse,
            api::models::payments::PaymentCreate,
            api::models::payments::PaymentResponse,
            api::models::payments::StudentPaymentResponse,
            api::models::statistics::StatisticsResponse,
        )
    ),
    tags(
        (name = "students", description = "Register students, list the roster, and remove a student together with their settlement and payment records."),
        (name = "rooms", description = "Room inventory and availability. Rooms are seeded from configuration; availability reflects current settlements against capacity."),
        (name = "settlements", description = "Assign a student to a room or evict them. Assignment enforces one room per student and the room's capacity."),
        (name = "payments", description = "Record dormitory payments and browse payment history, either globally or per student."),
        (name = "statistics", description = "Aggregate totals for the admin dashboard."),
    ),
    info(
        title = "Dormitory Administration API",
        version = "1.0.0",
        description = "Backend API for university dormitory administration: student registration, room assignment, and payment tracking.

## Errors

Failed requests return a JSON body with a single `error` field:

```json
{
  \"error\": \"Room is already full\"
}
```

Validation and business-rule failures use `400`, missing delete targets use `404`, and unexpected conditions use `500`.",
    ),
)]
pub struct ApiDoc;
