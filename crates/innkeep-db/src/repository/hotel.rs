//! SurrealDB implementation of [`HotelRepository`].
//!
//! Bookings are stored inside the hotel record. Appending one is a
//! single `bookings += $booking` update keyed by the hotel id; there is
//! no locking between concurrent bookings on the same hotel.

use chrono::{DateTime, Utc};
use innkeep_core::error::InnkeepResult;
use innkeep_core::models::booking::{Booking, NewBooking};
use innkeep_core::models::hotel::{CreateHotel, Hotel, HotelRecord};
use innkeep_core::repository::HotelRepository;
use innkeep_core::search::{HotelSearch, PAGE_SIZE, PageInfo, SearchPage, SortOption};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::debug;
use uuid::Uuid;

use super::parse_uuid;
use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct BookingRow {
    booking_id: String,
    user_id: String,
    first_name: String,
    last_name: String,
    email: String,
    adult_count: u32,
    child_count: u32,
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
    total_cost: f64,
}

impl BookingRow {
    fn try_into_booking(self) -> Result<Booking, DbError> {
        Ok(Booking {
            id: parse_uuid(&self.booking_id, "booking")?,
            user_id: parse_uuid(&self.user_id, "booking user")?,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            adult_count: self.adult_count,
            child_count: self.child_count,
            check_in: self.check_in,
            check_out: self.check_out,
            total_cost: self.total_cost,
        })
    }
}

/// DB-side row struct; the record ID comes back via `record::id(id)`.
#[derive(Debug, SurrealValue)]
struct HotelRow {
    record_id: String,
    user_id: String,
    name: String,
    city: String,
    country: String,
    description: String,
    hotel_type: String,
    adult_count: u32,
    child_count: u32,
    facilities: Vec<String>,
    price_per_night: f64,
    star_rating: i64,
    image_urls: Vec<String>,
    last_updated: DateTime<Utc>,
    bookings: Vec<BookingRow>,
}

impl HotelRow {
    fn try_into_hotel(self) -> Result<Hotel, DbError> {
        let star_rating = u8::try_from(self.star_rating)
            .map_err(|e| DbError::Corrupt(format!("invalid star rating: {e}")))?;
        let bookings = self
            .bookings
            .into_iter()
            .map(BookingRow::try_into_booking)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Hotel {
            id: parse_uuid(&self.record_id, "hotel")?,
            user_id: parse_uuid(&self.user_id, "owner")?,
            name: self.name,
            city: self.city,
            country: self.country,
            description: self.description,
            hotel_type: self.hotel_type,
            adult_count: self.adult_count,
            child_count: self.child_count,
            facilities: self.facilities,
            price_per_night: self.price_per_night,
            star_rating,
            image_urls: self.image_urls,
            last_updated: self.last_updated,
            bookings,
        })
    }
}

fn into_hotels(rows: Vec<HotelRow>) -> Result<Vec<Hotel>, DbError> {
    rows.into_iter().map(HotelRow::try_into_hotel).collect()
}

/// Row struct for existence checks.
#[derive(Debug, SurrealValue)]
struct IdRow {
    #[allow(dead_code)]
    record_id: String,
}

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

const SELECT_HOTEL: &str = "SELECT record::id(id) AS record_id, * FROM";

const SET_FIELDS: &str = "\
    name = $fields.name, city = $fields.city, country = $fields.country, \
    description = $fields.description, hotel_type = $fields.hotel_type, \
    adult_count = $fields.adult_count, child_count = $fields.child_count, \
    facilities = $fields.facilities, price_per_night = $fields.price_per_night, \
    star_rating = $fields.star_rating, image_urls = $fields.image_urls, \
    last_updated = $fields.last_updated";

/// Host-editable columns, bound as one `$fields` object.
#[derive(Debug, SurrealValue)]
struct RecordFields {
    name: String,
    city: String,
    country: String,
    description: String,
    hotel_type: String,
    adult_count: u32,
    child_count: u32,
    facilities: Vec<String>,
    price_per_night: f64,
    star_rating: i64,
    image_urls: Vec<String>,
    last_updated: DateTime<Utc>,
}

impl From<HotelRecord> for RecordFields {
    fn from(record: HotelRecord) -> Self {
        Self {
            name: record.name,
            city: record.city,
            country: record.country,
            description: record.description,
            hotel_type: record.hotel_type,
            adult_count: record.adult_count,
            child_count: record.child_count,
            facilities: record.facilities,
            price_per_night: record.price_per_night,
            star_rating: i64::from(record.star_rating),
            image_urls: record.image_urls,
            last_updated: record.last_updated,
        }
    }
}

/// Conditions for a search. Every filter that is set adds one AND-ed
/// condition; the parameters are always bound.
fn search_conditions(search: &HotelSearch) -> Vec<&'static str> {
    let mut conditions = Vec::new();
    if search.destination.is_some() {
        conditions.push(
            "(string::contains(string::lowercase(city), $destination) \
             OR string::contains(string::lowercase(country), $destination))",
        );
    }
    if search.min_adult_count.is_some() {
        conditions.push("adult_count >= $min_adult_count");
    }
    if search.min_child_count.is_some() {
        conditions.push("child_count >= $min_child_count");
    }
    if !search.facilities.is_empty() {
        conditions.push("facilities CONTAINSALL $facilities");
    }
    if !search.types.is_empty() {
        conditions.push("hotel_type INSIDE $types");
    }
    if !search.star_ratings.is_empty() {
        conditions.push("star_rating INSIDE $star_ratings");
    }
    if search.max_price.is_some() {
        conditions.push("price_per_night <= $max_price");
    }
    conditions
}

fn where_clause(search: &HotelSearch) -> String {
    let conditions = search_conditions(search);
    if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    }
}

fn order_clause(sort: Option<SortOption>) -> &'static str {
    match sort {
        Some(SortOption::StarRating) => " ORDER BY star_rating DESC",
        Some(SortOption::PricePerNightAsc) => " ORDER BY price_per_night ASC",
        Some(SortOption::PricePerNightDesc) => " ORDER BY price_per_night DESC",
        None => "",
    }
}

/// SurrealDB implementation of the Hotel repository.
#[derive(Clone)]
pub struct SurrealHotelRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealHotelRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> HotelRepository for SurrealHotelRepository<C> {
    async fn create(&self, input: CreateHotel) -> InnkeepResult<Hotel> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(format!(
                "CREATE type::record('hotel', $id) SET \
                 user_id = $user_id, bookings = [], {SET_FIELDS} \
                 RETURN NONE; \
                 {SELECT_HOTEL} type::record('hotel', $id);"
            ))
            .bind(("id", id_str.clone()))
            .bind(("fields", RecordFields::from(input.record)))
            .bind(("user_id", input.user_id.to_string()))
            .await
            .map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<HotelRow> = result.take(1).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "hotel".into(),
            id: id_str,
        })?;

        Ok(row.try_into_hotel()?)
    }

    async fn get_by_id(&self, id: Uuid) -> InnkeepResult<Hotel> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(format!("{SELECT_HOTEL} type::record('hotel', $id)"))
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<HotelRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "hotel".into(),
            id: id_str,
        })?;

        Ok(row.try_into_hotel()?)
    }

    async fn get_owned(&self, owner_id: Uuid, id: Uuid) -> InnkeepResult<Hotel> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(format!(
                "{SELECT_HOTEL} type::record('hotel', $id) \
                 WHERE user_id = $user_id"
            ))
            .bind(("id", id_str.clone()))
            .bind(("user_id", owner_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<HotelRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "hotel".into(),
            id: id_str,
        })?;

        Ok(row.try_into_hotel()?)
    }

    async fn update(&self, owner_id: Uuid, id: Uuid, record: HotelRecord) -> InnkeepResult<Hotel> {
        let id_str = id.to_string();

        let result = self
            .db
            .query(format!(
                "UPDATE type::record('hotel', $id) SET {SET_FIELDS} \
                 WHERE user_id = $user_id RETURN NONE; \
                 {SELECT_HOTEL} type::record('hotel', $id) \
                 WHERE user_id = $user_id;"
            ))
            .bind(("id", id_str.clone()))
            .bind(("fields", RecordFields::from(record)))
            .bind(("user_id", owner_id.to_string()))
            .await
            .map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<HotelRow> = result.take(1).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "hotel".into(),
            id: id_str,
        })?;

        Ok(row.try_into_hotel()?)
    }

    async fn list(&self) -> InnkeepResult<Vec<Hotel>> {
        let mut result = self
            .db
            .query(format!("{SELECT_HOTEL} hotel ORDER BY last_updated DESC"))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<HotelRow> = result.take(0).map_err(DbError::from)?;
        Ok(into_hotels(rows)?)
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> InnkeepResult<Vec<Hotel>> {
        let mut result = self
            .db
            .query(format!(
                "{SELECT_HOTEL} hotel WHERE user_id = $user_id \
                 ORDER BY last_updated DESC"
            ))
            .bind(("user_id", owner_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<HotelRow> = result.take(0).map_err(DbError::from)?;
        Ok(into_hotels(rows)?)
    }

    async fn search(&self, search: &HotelSearch) -> InnkeepResult<SearchPage<Hotel>> {
        let filter = where_clause(search);
        let statement = format!(
            "SELECT count() AS total FROM hotel{filter} GROUP ALL; \
             {SELECT_HOTEL} hotel{filter}{order} LIMIT $limit START $offset;",
            order = order_clause(search.sort),
        );
        debug!(query = %statement, page = search.page, "Searching hotels");

        let star_ratings: Vec<i64> = search.star_ratings.iter().map(|r| i64::from(*r)).collect();

        let mut result = self
            .db
            .query(statement)
            .bind(("destination", search.destination.as_deref().map(str::to_lowercase)))
            .bind(("min_adult_count", search.min_adult_count))
            .bind(("min_child_count", search.min_child_count))
            .bind(("facilities", search.facilities.clone()))
            .bind(("types", search.types.clone()))
            .bind(("star_ratings", star_ratings))
            .bind(("max_price", search.max_price))
            .bind(("limit", PAGE_SIZE))
            .bind(("offset", search.offset()))
            .await
            .map_err(DbError::from)?;

        let count_rows: Vec<CountRow> = result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let rows: Vec<HotelRow> = result.take(1).map_err(DbError::from)?;

        Ok(SearchPage {
            data: into_hotels(rows)?,
            pagination: PageInfo::new(total, search.page),
        })
    }

    async fn add_booking(&self, hotel_id: Uuid, booking: NewBooking) -> InnkeepResult<Booking> {
        let booking_id = Uuid::new_v4();
        let id_str = hotel_id.to_string();

        let row = BookingRow {
            booking_id: booking_id.to_string(),
            user_id: booking.user_id.to_string(),
            first_name: booking.first_name,
            last_name: booking.last_name,
            email: booking.email,
            adult_count: booking.adult_count,
            child_count: booking.child_count,
            check_in: booking.check_in,
            check_out: booking.check_out,
            total_cost: booking.total_cost,
        };

        let result = self
            .db
            .query(format!(
                "UPDATE type::record('hotel', $id) SET bookings += $booking \
                 RETURN NONE; \
                 SELECT record::id(id) AS record_id FROM type::record('hotel', $id);"
            ))
            .bind(("id", id_str.clone()))
            .bind(("booking", row))
            .await
            .map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let touched: Vec<IdRow> = result.take(1).map_err(DbError::from)?;
        if touched.is_empty() {
            return Err(DbError::NotFound {
                entity: "hotel".into(),
                id: id_str,
            }
            .into());
        }

        // Read the appended entry back so the caller sees what was stored.
        let hotel = self.get_by_id(hotel_id).await?;
        let stored = hotel
            .bookings
            .into_iter()
            .find(|b| b.id == booking_id)
            .ok_or_else(|| DbError::NotFound {
                entity: "booking".into(),
                id: booking_id.to_string(),
            })?;

        Ok(stored)
    }

    async fn list_booked_by(&self, user_id: Uuid) -> InnkeepResult<Vec<Hotel>> {
        let mut result = self
            .db
            .query(format!(
                "{SELECT_HOTEL} hotel WHERE $user_id INSIDE bookings.user_id \
                 ORDER BY last_updated DESC"
            ))
            .bind(("user_id", user_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<HotelRow> = result.take(0).map_err(DbError::from)?;
        Ok(into_hotels(rows)?
            .into_iter()
            .map(|hotel| hotel.retain_bookings_of(user_id))
            .collect())
    }
}
