//! User entity model and DTOs.

use lendly_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserProfile`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub address: String,
    pub lng: f64,
    pub lat: f64,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
    pub trust_score: f64,
    pub total_exchanges: i32,
    pub items_shared: i32,
    pub items_borrowed: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserProfile {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub lng: f64,
    pub lat: f64,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
    pub trust_score: f64,
    pub total_exchanges: i32,
    pub items_shared: i32,
    pub items_borrowed: i32,
    pub created_at: Timestamp,
}

impl From<User> for UserProfile {
    fn from(u: User) -> Self {
        UserProfile {
            id: u.id,
            first_name: u.first_name,
            last_name: u.last_name,
            email: u.email,
            address: u.address,
            lng: u.lng,
            lat: u.lat,
            bio: u.bio,
            profile_image: u.profile_image,
            trust_score: u.trust_score,
            total_exchanges: u.total_exchanges,
            items_shared: u.items_shared,
            items_borrowed: u.items_borrowed,
            created_at: u.created_at,
        }
    }
}

/// DTO for creating a new user (registration).
#[derive(Debug)]
pub struct CreateUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub address: String,
    pub lng: f64,
    pub lat: f64,
    pub bio: Option<String>,
}

/// DTO for updating a user's own profile. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<String>,
    pub lng: Option<f64>,
    pub lat: Option<f64>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
}
