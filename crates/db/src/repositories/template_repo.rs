//! Repository for the `report_templates` table.

use sqlx::PgPool;

use servio_core::types::Id;

use crate::models::template::{Template, TemplateIn};

const COLUMNS: &str = "id, template_type, title, language, text, created_at, updated_at";

pub struct TemplateRepo;

impl TemplateRepo {
    pub async fn create(pool: &PgPool, input: &TemplateIn) -> Result<Template, sqlx::Error> {
        let query = format!(
            "INSERT INTO report_templates (id, template_type, title, language, text) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Template>(&query)
            .bind(Id::now_v7())
            .bind(&input.template_type)
            .bind(&input.title)
            .bind(&input.language)
            .bind(&input.text)
            .fetch_one(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        template_type: Option<&str>,
    ) -> Result<Vec<Template>, sqlx::Error> {
        match template_type {
            Some(t) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM report_templates WHERE template_type = $1 \
                     ORDER BY created_at"
                );
                sqlx::query_as::<_, Template>(&query)
                    .bind(t)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query =
                    format!("SELECT {COLUMNS} FROM report_templates ORDER BY created_at");
                sqlx::query_as::<_, Template>(&query).fetch_all(pool).await
            }
        }
    }

    pub async fn update(
        pool: &PgPool,
        id: Id,
        input: &TemplateIn,
    ) -> Result<Option<Template>, sqlx::Error> {
        let query = format!(
            "UPDATE report_templates SET template_type = $2, title = $3, language = $4, \
             text = $5, updated_at = now() WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Template>(&query)
            .bind(id)
            .bind(&input.template_type)
            .bind(&input.title)
            .bind(&input.language)
            .bind(&input.text)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: Id) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM report_templates WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*)::BIGINT FROM report_templates")
            .fetch_one(pool)
            .await
    }
}
