//! Repositories for the `customers` and `customer_contacts` tables.

use sqlx::PgPool;

use servio_core::types::Id;

use crate::models::customer::{Contact, ContactIn, Customer, CustomerIn};

/// Column list for `customers` SELECT queries.
const CUSTOMER_COLUMNS: &str = "\
    id, name, tax_no, email, phone, address, city, country, \
    shipping_address, created_at, updated_at";

/// Column list for `customer_contacts` SELECT queries.
const CONTACT_COLUMNS: &str = "\
    id, customer_id, name, email, phone, title, department, is_default, \
    created_at, updated_at";

pub struct CustomerRepo;

impl CustomerRepo {
    pub async fn create(pool: &PgPool, input: &CustomerIn) -> Result<Customer, sqlx::Error> {
        let query = format!(
            "INSERT INTO customers (id, name, tax_no, email, phone, address, city, country, shipping_address) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {CUSTOMER_COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(Id::now_v7())
            .bind(&input.name)
            .bind(&input.tax_no)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.address)
            .bind(&input.city)
            .bind(&input.country)
            .bind(&input.shipping_address)
            .fetch_one(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Customer>, sqlx::Error> {
        let query = format!("SELECT {CUSTOMER_COLUMNS} FROM customers ORDER BY created_at DESC");
        sqlx::query_as::<_, Customer>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: Id) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = $1");
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: Id,
        input: &CustomerIn,
    ) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!(
            "UPDATE customers SET name = $2, tax_no = $3, email = $4, phone = $5, \
             address = $6, city = $7, country = $8, shipping_address = $9, updated_at = now() \
             WHERE id = $1 RETURNING {CUSTOMER_COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.tax_no)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.address)
            .bind(&input.city)
            .bind(&input.country)
            .bind(&input.shipping_address)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: Id) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*)::BIGINT FROM customers")
            .fetch_one(pool)
            .await
    }
}

pub struct ContactRepo;

impl ContactRepo {
    pub async fn create(
        pool: &PgPool,
        customer_id: Id,
        input: &ContactIn,
    ) -> Result<Contact, sqlx::Error> {
        let query = format!(
            "INSERT INTO customer_contacts (id, customer_id, name, email, phone, title, department, is_default) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {CONTACT_COLUMNS}"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(Id::now_v7())
            .bind(customer_id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.title)
            .bind(&input.department)
            .bind(input.is_default)
            .fetch_one(pool)
            .await
    }

    pub async fn list_by_customer(
        pool: &PgPool,
        customer_id: Id,
    ) -> Result<Vec<Contact>, sqlx::Error> {
        let query = format!(
            "SELECT {CONTACT_COLUMNS} FROM customer_contacts WHERE customer_id = $1 \
             ORDER BY created_at"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(customer_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: Id,
        input: &ContactIn,
    ) -> Result<Option<Contact>, sqlx::Error> {
        let query = format!(
            "UPDATE customer_contacts SET customer_id = $2, name = $3, email = $4, phone = $5, \
             title = $6, department = $7, is_default = $8, updated_at = now() \
             WHERE id = $1 RETURNING {CONTACT_COLUMNS}"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(id)
            .bind(input.customer_id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.title)
            .bind(&input.department)
            .bind(input.is_default)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: Id) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM customer_contacts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
