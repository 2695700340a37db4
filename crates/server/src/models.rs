// Database models for Diesel
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;

/// A row in the `users` table. The `password` column holds the bcrypt
/// hash, never the plaintext.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub username: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for new users
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Public view of a user for the listing endpoint. Deliberately omits the
/// password hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        UserSummary {
            username: user.username,
            created_at: user.created_at,
        }
    }
}
