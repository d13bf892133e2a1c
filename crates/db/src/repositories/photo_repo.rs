//! Repository for the `photos` table.

use sqlx::PgPool;

use servio_core::types::Id;

use crate::models::photo::{CreatePhoto, Photo, UpdatePhoto};

const COLUMNS: &str = "\
    id, report_id, kind, caption, tags, original_object_key, \
    original_size_bytes, optimized_object_key, thumb_object_key, \
    optimized_width, optimized_height, thumb_width, thumb_height, \
    created_at, updated_at";

pub struct PhotoRepo;

impl PhotoRepo {
    pub async fn create(pool: &PgPool, input: &CreatePhoto) -> Result<Photo, sqlx::Error> {
        let query = format!(
            "INSERT INTO photos (id, report_id, kind, caption, tags, original_object_key, \
             original_size_bytes, optimized_object_key, thumb_object_key, optimized_width, \
             optimized_height, thumb_width, thumb_height) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Photo>(&query)
            .bind(Id::now_v7())
            .bind(input.report_id)
            .bind(&input.kind)
            .bind(&input.caption)
            .bind(&input.tags)
            .bind(&input.original_object_key)
            .bind(input.original_size_bytes)
            .bind(&input.optimized_object_key)
            .bind(&input.thumb_object_key)
            .bind(input.optimized_width)
            .bind(input.optimized_height)
            .bind(input.thumb_width)
            .bind(input.thumb_height)
            .fetch_one(pool)
            .await
    }

    /// Fetch photos by id, preserving presence only (callers keep their own
    /// ordering; dangling ids simply do not come back).
    pub async fn find_by_ids(pool: &PgPool, ids: &[Id]) -> Result<Vec<Photo>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM photos WHERE id = ANY($1)");
        sqlx::query_as::<_, Photo>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: Id,
        input: &UpdatePhoto,
    ) -> Result<Option<Photo>, sqlx::Error> {
        let query = format!(
            "UPDATE photos SET caption = COALESCE($2, caption), \
             tags = COALESCE($3, tags), updated_at = now() \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Photo>(&query)
            .bind(id)
            .bind(&input.caption)
            .bind(&input.tags)
            .fetch_optional(pool)
            .await
    }

    /// Hard delete. The owning report's `photo_sets` reference is left in
    /// place; readers tolerate the dangling id.
    pub async fn delete(pool: &PgPool, id: Id) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM photos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
