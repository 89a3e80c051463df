//! Hotel listing, search and host-side management.

use std::sync::Arc;

use chrono::Utc;
use futures::future::try_join_all;
use innkeep_core::error::{InnkeepError, InnkeepResult};
use innkeep_core::gateway::{ImageUpload, MediaStore};
use innkeep_core::models::hotel::{CreateHotel, Hotel, HotelFields, HotelRecord};
use innkeep_core::repository::HotelRepository;
use innkeep_core::search::{HotelSearch, SearchPage};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// Maximum number of image files per create or update.
pub const MAX_IMAGES: usize = 6;
/// Maximum size of a single image file.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

fn check_images(images: &[ImageUpload]) -> InnkeepResult<()> {
    if images.len() > MAX_IMAGES {
        return Err(InnkeepError::validation(format!(
            "At most {MAX_IMAGES} images are allowed"
        )));
    }
    for image in images {
        let name = image.file_name.as_deref().unwrap_or("image");
        if image.bytes.len() > MAX_IMAGE_BYTES {
            return Err(InnkeepError::validation(format!(
                "{name} is larger than 5 MB"
            )));
        }
        if !image.content_type.starts_with("image/") {
            return Err(InnkeepError::validation(format!("{name} is not an image")));
        }
    }
    Ok(())
}

fn required<T>(value: Option<T>, what: &str) -> InnkeepResult<T> {
    value.ok_or_else(|| InnkeepError::validation(format!("{what} is required")))
}

/// Turn validated fields into a record, images first as uploaded, then
/// the retained URLs.
fn into_record(fields: HotelFields, uploaded: Vec<String>) -> InnkeepResult<HotelRecord> {
    let mut image_urls = uploaded;
    image_urls.extend(fields.image_urls);

    Ok(HotelRecord {
        adult_count: required(fields.adult_count, "Adult count")?,
        child_count: required(fields.child_count, "Child count")?,
        price_per_night: required(fields.price_per_night, "Price per night")?,
        star_rating: required(fields.star_rating, "Star rating")?,
        name: fields.name,
        city: fields.city,
        country: fields.country,
        description: fields.description,
        hotel_type: fields.hotel_type,
        facilities: fields.facilities,
        image_urls,
        last_updated: Utc::now(),
    })
}

pub struct HotelService<H: HotelRepository> {
    hotels: H,
    media: Arc<dyn MediaStore>,
}

impl<H: HotelRepository> HotelService<H> {
    pub fn new(hotels: H, media: Arc<dyn MediaStore>) -> Self {
        Self { hotels, media }
    }

    async fn upload_all(&self, images: Vec<ImageUpload>) -> InnkeepResult<Vec<String>> {
        try_join_all(images.into_iter().map(|image| self.media.upload(image))).await
    }

    pub async fn create(
        &self,
        owner_id: Uuid,
        fields: HotelFields,
        images: Vec<ImageUpload>,
    ) -> InnkeepResult<Hotel> {
        fields.validate()?;
        check_images(&images)?;

        let uploaded = self.upload_all(images).await?;
        let record = into_record(fields, uploaded)?;

        let hotel = self
            .hotels
            .create(CreateHotel {
                user_id: owner_id,
                record,
            })
            .await?;
        info!(hotel_id = %hotel.id, %owner_id, images = hotel.image_urls.len(), "Hotel created");
        Ok(hotel)
    }

    /// Replace an owned hotel's fields. Bookings are kept.
    pub async fn update(
        &self,
        owner_id: Uuid,
        hotel_id: Uuid,
        fields: HotelFields,
        images: Vec<ImageUpload>,
    ) -> InnkeepResult<Hotel> {
        fields.validate()?;
        check_images(&images)?;

        // Ownership check before any upload.
        self.hotels.get_owned(owner_id, hotel_id).await?;

        let uploaded = self.upload_all(images).await?;
        let record = into_record(fields, uploaded)?;

        let hotel = self.hotels.update(owner_id, hotel_id, record).await?;
        info!(%hotel_id, %owner_id, "Hotel updated");
        Ok(hotel)
    }

    pub async fn get(&self, hotel_id: Uuid) -> InnkeepResult<Hotel> {
        self.hotels.get_by_id(hotel_id).await
    }

    pub async fn list(&self) -> InnkeepResult<Vec<Hotel>> {
        self.hotels.list().await
    }

    pub async fn list_owned(&self, owner_id: Uuid) -> InnkeepResult<Vec<Hotel>> {
        self.hotels.list_by_owner(owner_id).await
    }

    pub async fn get_owned(&self, owner_id: Uuid, hotel_id: Uuid) -> InnkeepResult<Hotel> {
        self.hotels.get_owned(owner_id, hotel_id).await
    }

    pub async fn search(&self, search: &HotelSearch) -> InnkeepResult<SearchPage<Hotel>> {
        self.hotels.search(search).await
    }
}
