//! Public enquiry handlers

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use validator::Validate;

use crate::core::ServerState;
use crate::db::repository::EnquiryRepository;
use crate::notifications::NotificationJob;
use crate::utils::{AppJson, AppResult};
use shared::ApiResponse;
use shared::models::{Enquiry, EnquiryStatus};
use shared::request::EnquiryCreate;

/// POST /api/enquiries - submit a customer enquiry
///
/// Admin alert always goes out; the customer confirmation email is skipped
/// when no email was supplied.
pub async fn create(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<EnquiryCreate>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    let enquiry = Enquiry {
        id: String::new(),
        name: payload.name.trim().to_string(),
        phone: payload.phone.trim().to_string(),
        email: payload
            .email
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty()),
        enquiry_type: payload.enquiry_type,
        message: payload.message,
        status: EnquiryStatus::Pending,
        created_at: chrono::Utc::now().timestamp_millis(),
    };

    let enquiry = EnquiryRepository::new(state.db.clone()).create(enquiry).await?;

    state.notifications.enqueue(NotificationJob::EnquiryReceived {
        enquiry: enquiry.clone(),
    });

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(
            enquiry,
            "Enquiry submitted successfully",
        )),
    ))
}
