//! `/api/my-hotels`: host-side hotel management.
//!
//! Create and update take `multipart/form-data`: text fields for the
//! hotel plus up to six `imageFiles` parts.

use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use innkeep_core::gateway::ImageUpload;
use innkeep_core::models::hotel::{Hotel, HotelFields};
use innkeep_hotels::{MAX_IMAGE_BYTES, MAX_IMAGES};

use super::parse_hotel_id;
use crate::error::ApiResult;
use crate::extract::AuthUser;
use crate::state::AppState;

/// Room for every image at full size plus the text fields.
const BODY_LIMIT: usize = MAX_IMAGES * MAX_IMAGE_BYTES + 1024 * 1024;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{hotel_id}", get(detail).put(update))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
}

/// Field name without an array index suffix: `facilities[2]` -> `facilities`.
fn base_name(name: &str) -> &str {
    match name.find('[') {
        Some(idx) if name.ends_with(']') => &name[..idx],
        _ => name,
    }
}

fn parse_number<T: std::str::FromStr>(raw: &str) -> Option<T> {
    raw.trim().parse().ok()
}

/// Collect the hotel form. Numbers that don't parse are left unset and
/// reported by validation.
async fn read_form(mut multipart: Multipart) -> ApiResult<(HotelFields, Vec<ImageUpload>)> {
    let mut fields = HotelFields::default();
    let mut images = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        if base_name(&name) == "imageFiles" {
            let file_name = field.file_name().map(str::to_string);
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field.bytes().await?;
            if bytes.is_empty() {
                continue;
            }
            images.push(ImageUpload {
                file_name,
                content_type,
                bytes: bytes.to_vec(),
            });
            continue;
        }

        let value = field.text().await?;
        match base_name(&name) {
            "name" => fields.name = value.trim().to_string(),
            "city" => fields.city = value.trim().to_string(),
            "country" => fields.country = value.trim().to_string(),
            "description" => fields.description = value.trim().to_string(),
            "type" => fields.hotel_type = value.trim().to_string(),
            "pricePerNight" => {
                fields.price_per_night = parse_number::<f64>(&value).filter(|p| p.is_finite())
            }
            "starRating" => fields.star_rating = parse_number(&value),
            "adultCount" => fields.adult_count = parse_number(&value),
            "childCount" => fields.child_count = parse_number(&value),
            "facilities" => {
                let facility = value.trim();
                if !facility.is_empty() {
                    fields.facilities.push(facility.to_string());
                }
            }
            "imageUrls" => {
                let url = value.trim();
                if !url.is_empty() {
                    fields.image_urls.push(url.to_string());
                }
            }
            _ => {}
        }
    }

    Ok((fields, images))
}

async fn create(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    multipart: Multipart,
) -> ApiResult<(StatusCode, Json<Hotel>)> {
    let (fields, images) = read_form(multipart).await?;
    let hotel = state.hotels.create(user_id, fields, images).await?;
    Ok((StatusCode::CREATED, Json(hotel)))
}

async fn list(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<Vec<Hotel>>> {
    Ok(Json(state.hotels.list_owned(user_id).await?))
}

async fn detail(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(hotel_id): Path<String>,
) -> ApiResult<Json<Hotel>> {
    let hotel_id = parse_hotel_id(&hotel_id)?;
    Ok(Json(state.hotels.get_owned(user_id, hotel_id).await?))
}

async fn update(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(hotel_id): Path<String>,
    multipart: Multipart,
) -> ApiResult<Json<Hotel>> {
    let hotel_id = parse_hotel_id(&hotel_id)?;
    let (fields, images) = read_form(multipart).await?;
    let hotel = state.hotels.update(user_id, hotel_id, fields, images).await?;
    Ok(Json(hotel))
}
