//! Repository for the `action_library` table.
//!
//! Entries are soft-deleted: the delete operation flips `is_active` and
//! stamps `deleted_at`; nothing is ever removed through the guarded API.

use sqlx::PgPool;

use servio_core::types::Id;

use crate::models::action_library::{
    ActionLibraryEntry, ActionLibraryFilter, ActionLibraryIn, ReorderItem,
};

const COLUMNS: &str = "\
    id, scope, valve_type, category, order_index, title_tr, title_en, \
    text_tr, text_en, is_active, created_by_user, created_at, updated_at, \
    deleted_at";

pub struct ActionLibraryRepo;

impl ActionLibraryRepo {
    pub async fn create(
        pool: &PgPool,
        input: &ActionLibraryIn,
    ) -> Result<ActionLibraryEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO action_library (id, scope, valve_type, category, order_index, \
             title_tr, title_en, text_tr, text_en, is_active, created_by_user) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActionLibraryEntry>(&query)
            .bind(Id::now_v7())
            .bind(&input.scope)
            .bind(&input.valve_type)
            .bind(&input.category)
            .bind(input.order_index)
            .bind(&input.title_tr)
            .bind(&input.title_en)
            .bind(&input.text_tr)
            .bind(&input.text_en)
            .bind(input.is_active)
            .bind(&input.created_by_user)
            .fetch_one(pool)
            .await
    }

    /// List entries ordered for display: by scope, then order index.
    ///
    /// A `valve_type` filter also matches entries with no valve type (they
    /// apply to every valve type).
    pub async fn list(
        pool: &PgPool,
        filter: &ActionLibraryFilter,
    ) -> Result<Vec<ActionLibraryEntry>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut bind_idx = 1u32;
        let mut texts: Vec<String> = Vec::new();

        if let Some(ref scope) = filter.scope {
            conditions.push(format!("scope = ${bind_idx}"));
            bind_idx += 1;
            texts.push(scope.clone());
        }
        if let Some(ref valve_type) = filter.valve_type {
            conditions.push(format!(
                "(valve_type = ${bind_idx} OR valve_type IS NULL OR valve_type = '')"
            ));
            bind_idx += 1;
            texts.push(valve_type.clone());
        }
        if !filter.include_inactive {
            conditions.push("is_active = TRUE".to_string());
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM action_library {where_clause} ORDER BY scope, order_index"
        );
        let mut q = sqlx::query_as::<_, ActionLibraryEntry>(&query);
        for text in &texts {
            q = q.bind(text.as_str());
        }
        q.fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: Id,
        input: &ActionLibraryIn,
    ) -> Result<Option<ActionLibraryEntry>, sqlx::Error> {
        let query = format!(
            "UPDATE action_library SET scope = $2, valve_type = $3, category = $4, \
             order_index = $5, title_tr = $6, title_en = $7, text_tr = $8, text_en = $9, \
             is_active = $10, created_by_user = $11, updated_at = now() \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActionLibraryEntry>(&query)
            .bind(id)
            .bind(&input.scope)
            .bind(&input.valve_type)
            .bind(&input.category)
            .bind(input.order_index)
            .bind(&input.title_tr)
            .bind(&input.title_en)
            .bind(&input.text_tr)
            .bind(&input.text_en)
            .bind(input.is_active)
            .bind(&input.created_by_user)
            .fetch_optional(pool)
            .await
    }

    /// Apply display-order updates one entry at a time.
    pub async fn reorder(pool: &PgPool, items: &[ReorderItem]) -> Result<(), sqlx::Error> {
        for item in items {
            sqlx::query(
                "UPDATE action_library SET order_index = $2, updated_at = now() WHERE id = $1",
            )
            .bind(item.id)
            .bind(item.order_index)
            .execute(pool)
            .await?;
        }
        Ok(())
    }

    /// Soft delete: deactivate and stamp `deleted_at`.
    pub async fn soft_delete(pool: &PgPool, id: Id) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE action_library SET is_active = FALSE, deleted_at = now(), \
             updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// The `{scope, text_tr}` pairs already present, used by the seed to
    /// stay idempotent.
    pub async fn existing_seed_keys(pool: &PgPool) -> Result<Vec<(String, String)>, sqlx::Error> {
        sqlx::query_as::<_, (String, String)>("SELECT scope, text_tr FROM action_library")
            .fetch_all(pool)
            .await
    }
}
