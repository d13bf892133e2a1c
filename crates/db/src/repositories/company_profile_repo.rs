//! Repository for the `company_profiles` table.
//!
//! At most one profile is marked default; setting the flag clears it on
//! every other profile first.

use sqlx::types::Json;
use sqlx::PgPool;

use servio_core::types::Id;

use crate::models::company_profile::{CompanyProfile, CompanyProfileIn};

const COLUMNS: &str = "\
    id, name, legal_company_name, legal_text, legal_notes, address, phone, \
    email, signature_labels, logo_object_key, is_default, created_at, updated_at";

pub struct CompanyProfileRepo;

impl CompanyProfileRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CompanyProfileIn,
    ) -> Result<CompanyProfile, sqlx::Error> {
        if input.is_default {
            Self::clear_defaults(pool).await?;
        }
        let query = format!(
            "INSERT INTO company_profiles (id, name, legal_company_name, legal_text, \
             legal_notes, address, phone, email, signature_labels, logo_object_key, is_default) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CompanyProfile>(&query)
            .bind(Id::now_v7())
            .bind(&input.name)
            .bind(&input.legal_company_name)
            .bind(&input.legal_text)
            .bind(Json(&input.legal_notes))
            .bind(&input.address)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(Json(&input.signature_labels))
            .bind(&input.logo_object_key)
            .bind(input.is_default)
            .fetch_one(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<CompanyProfile>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM company_profiles ORDER BY created_at DESC");
        sqlx::query_as::<_, CompanyProfile>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: Id) -> Result<Option<CompanyProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM company_profiles WHERE id = $1");
        sqlx::query_as::<_, CompanyProfile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_default(pool: &PgPool) -> Result<Option<CompanyProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM company_profiles WHERE is_default LIMIT 1");
        sqlx::query_as::<_, CompanyProfile>(&query)
            .fetch_optional(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: Id,
        input: &CompanyProfileIn,
    ) -> Result<Option<CompanyProfile>, sqlx::Error> {
        if input.is_default {
            Self::clear_defaults(pool).await?;
        }
        let query = format!(
            "UPDATE company_profiles SET name = $2, legal_company_name = $3, legal_text = $4, \
             legal_notes = $5, address = $6, phone = $7, email = $8, signature_labels = $9, \
             logo_object_key = $10, is_default = $11, updated_at = now() \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CompanyProfile>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.legal_company_name)
            .bind(&input.legal_text)
            .bind(Json(&input.legal_notes))
            .bind(&input.address)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(Json(&input.signature_labels))
            .bind(&input.logo_object_key)
            .bind(input.is_default)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: Id) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM company_profiles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn set_logo(pool: &PgPool, id: Id, object_key: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE company_profiles SET logo_object_key = $2, updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .bind(object_key)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn clear_defaults(pool: &PgPool) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE company_profiles SET is_default = FALSE WHERE is_default")
            .execute(pool)
            .await?;
        Ok(())
    }
}
