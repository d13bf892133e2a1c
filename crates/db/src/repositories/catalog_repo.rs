//! Repositories for the `brands` and `models` catalog tables.

use sqlx::PgPool;

use servio_core::types::Id;

use crate::models::catalog::{Brand, BrandIn, ProductModel, ProductModelIn};

const BRAND_COLUMNS: &str = "id, name, created_at, updated_at";
const MODEL_COLUMNS: &str = "id, brand_id, name, created_at, updated_at";

pub struct BrandRepo;

impl BrandRepo {
    pub async fn create(pool: &PgPool, input: &BrandIn) -> Result<Brand, sqlx::Error> {
        let query =
            format!("INSERT INTO brands (id, name) VALUES ($1, $2) RETURNING {BRAND_COLUMNS}");
        sqlx::query_as::<_, Brand>(&query)
            .bind(Id::now_v7())
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Brand>, sqlx::Error> {
        let query = format!("SELECT {BRAND_COLUMNS} FROM brands ORDER BY name");
        sqlx::query_as::<_, Brand>(&query).fetch_all(pool).await
    }
}

pub struct ProductModelRepo;

impl ProductModelRepo {
    pub async fn create(
        pool: &PgPool,
        brand_id: Id,
        input: &ProductModelIn,
    ) -> Result<ProductModel, sqlx::Error> {
        let query = format!(
            "INSERT INTO models (id, brand_id, name) VALUES ($1, $2, $3) \
             RETURNING {MODEL_COLUMNS}"
        );
        sqlx::query_as::<_, ProductModel>(&query)
            .bind(Id::now_v7())
            .bind(brand_id)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: Id) -> Result<Option<ProductModel>, sqlx::Error> {
        let query = format!("SELECT {MODEL_COLUMNS} FROM models WHERE id = $1");
        sqlx::query_as::<_, ProductModel>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: Id,
        input: &ProductModelIn,
    ) -> Result<Option<ProductModel>, sqlx::Error> {
        let query = format!(
            "UPDATE models SET brand_id = $2, name = $3, updated_at = now() \
             WHERE id = $1 RETURNING {MODEL_COLUMNS}"
        );
        sqlx::query_as::<_, ProductModel>(&query)
            .bind(id)
            .bind(input.brand_id)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: Id) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM models WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
