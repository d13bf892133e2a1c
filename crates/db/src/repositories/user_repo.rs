//! Repository for the `users` table (development login stub).

use sqlx::PgPool;

use crate::models::user::User;

const COLUMNS: &str = "id, email, name, role, created_at";

pub struct UserRepo;

impl UserRepo {
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }
}
