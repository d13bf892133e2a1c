//! Repository for the `products` table.

use sqlx::types::Json;
use sqlx::PgPool;

use servio_core::types::Id;

use crate::models::product::{Product, ProductFilter, ProductIn};

const COLUMNS: &str = "\
    id, customer_id, brand_id, model_id, product_type, serial_no, tag_no, \
    dn_pn, notes, technical_card, valve_type, manufacturer, size, \
    pressure_class, connection_type, body_style, fail_action, \
    body_material, trim_material, seat_material, stem_material, \
    actuator, accessories, created_at, updated_at";

pub struct ProductRepo;

impl ProductRepo {
    pub async fn create(pool: &PgPool, input: &ProductIn) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products (id, customer_id, brand_id, model_id, product_type, \
             serial_no, tag_no, dn_pn, notes, technical_card, valve_type, manufacturer, \
             size, pressure_class, connection_type, body_style, fail_action, \
             body_material, trim_material, seat_material, stem_material, actuator, accessories) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, \
             $16, $17, $18, $19, $20, $21, $22, $23) \
             RETURNING {COLUMNS}"
        );
        Self::bind_payload(sqlx::query_as::<_, Product>(&query).bind(Id::now_v7()), input)
            .fetch_one(pool)
            .await
    }

    pub async fn list(pool: &PgPool, filter: &ProductFilter) -> Result<Vec<Product>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut bind_idx = 1u32;
        let mut ids: Vec<Id> = Vec::new();

        for (column, value) in [
            ("customer_id", filter.customer_id),
            ("brand_id", filter.brand_id),
            ("model_id", filter.model_id),
        ] {
            if let Some(id) = value {
                conditions.push(format!("{column} = ${bind_idx}"));
                bind_idx += 1;
                ids.push(id);
            }
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!("SELECT {COLUMNS} FROM products {where_clause} ORDER BY created_at");
        let mut q = sqlx::query_as::<_, Product>(&query);
        for id in ids {
            q = q.bind(id);
        }
        q.fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: Id) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: Id,
        input: &ProductIn,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET customer_id = $2, brand_id = $3, model_id = $4, \
             product_type = $5, serial_no = $6, tag_no = $7, dn_pn = $8, notes = $9, \
             technical_card = $10, valve_type = $11, manufacturer = $12, size = $13, \
             pressure_class = $14, connection_type = $15, body_style = $16, \
             fail_action = $17, body_material = $18, trim_material = $19, \
             seat_material = $20, stem_material = $21, actuator = $22, accessories = $23, \
             updated_at = now() \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        Self::bind_payload(sqlx::query_as::<_, Product>(&query).bind(id), input)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: Id) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*)::BIGINT FROM products")
            .fetch_one(pool)
            .await
    }

    /// Bind the 22 payload parameters shared by INSERT and UPDATE ($2..$23).
    fn bind_payload<'q>(
        q: sqlx::query::QueryAs<'q, sqlx::Postgres, Product, sqlx::postgres::PgArguments>,
        input: &'q ProductIn,
    ) -> sqlx::query::QueryAs<'q, sqlx::Postgres, Product, sqlx::postgres::PgArguments> {
        q.bind(input.customer_id)
            .bind(input.brand_id)
            .bind(input.model_id)
            .bind(&input.product_type)
            .bind(&input.serial_no)
            .bind(&input.tag_no)
            .bind(&input.dn_pn)
            .bind(&input.notes)
            .bind(Json(&input.technical_card))
            .bind(&input.valve_type)
            .bind(&input.manufacturer)
            .bind(&input.size)
            .bind(&input.pressure_class)
            .bind(&input.connection_type)
            .bind(&input.body_style)
            .bind(&input.fail_action)
            .bind(&input.body_material)
            .bind(&input.trim_material)
            .bind(&input.seat_material)
            .bind(&input.stem_material)
            .bind(input.actuator.as_ref().map(Json))
            .bind(Json(&input.accessories))
    }
}
