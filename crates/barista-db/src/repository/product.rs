//! # Product Repository
//!
//! Database operations for the product catalog.
//!
//! ## Key Operations
//! - Lookup and case-insensitive name search
//! - Inserts (seeding) and restocking
//! - The clamped stock decrement used by checkout
//!
//! ## Stock Decrement Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                 Clamped Decrement (floor at zero)                   │
//! │                                                                     │
//! │  UPDATE products SET stock = MAX(stock - qty, 0) WHERE id = ?       │
//! │                                                                     │
//! │  stock=5, qty=3  →  stock=2                                         │
//! │  stock=5, qty=8  →  stock=0   (over-demand absorbed, never −3)      │
//! │                                                                     │
//! │  Checkout deliberately never blocks on a stock race; the clamp      │
//! │  only prevents stock from going negative.                           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use barista_core::validation::{validate_price_cents, validate_product_name, validate_stock};
use barista_core::Product;

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// // Search the catalog
/// let results = repo.search("espresso", 20).await?;
///
/// // Get by ID
/// let product = repo.get_by_id("uuid-here").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price_cents, stock, created_at, updated_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Gets a product by its exact name.
    ///
    /// Used at seed time to skip already-present catalog entries.
    pub async fn get_by_name(&self, name: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price_cents, stock, created_at, updated_at
            FROM products
            WHERE name = ?1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Searches products by case-insensitive substring match on name.
    ///
    /// An empty (or whitespace) term lists the whole catalog. Results
    /// are ordered by name.
    ///
    /// ## Arguments
    /// * `term` - Search term (can be partial)
    /// * `limit` - Maximum results to return
    pub async fn search(&self, term: &str, limit: u32) -> DbResult<Vec<Product>> {
        let term = term.trim();

        debug!(term = %term, limit = %limit, "Searching products");

        let pattern = format!("%{}%", term);

        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price_cents, stock, created_at, updated_at
            FROM products
            WHERE name LIKE ?1 COLLATE NOCASE
            ORDER BY name ASC
            LIMIT ?2
            "#,
        )
        .bind(pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Search returned products");
        Ok(products)
    }

    /// Inserts a new product.
    ///
    /// Field rules (non-empty name, positive price, non-negative
    /// stock) are checked here, before the row ever reaches SQLite's
    /// own CHECK constraints.
    ///
    /// ## Returns
    /// * `Ok(())` - Inserted
    /// * `Err(DbError::ConstraintViolation)` - a field rule failed
    /// * `Err(DbError::UniqueViolation)` - ID already exists
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(name = %product.name, "Inserting product");

        validate_product_name(&product.name).map_err(|e| DbError::ConstraintViolation {
            message: e.to_string(),
        })?;
        validate_price_cents(product.price_cents).map_err(|e| DbError::ConstraintViolation {
            message: e.to_string(),
        })?;
        validate_stock(product.stock).map_err(|e| DbError::ConstraintViolation {
            message: e.to_string(),
        })?;

        sqlx::query(
            r#"
            INSERT INTO products (id, name, price_cents, stock, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(product.price_cents)
        .bind(product.stock)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Decrements stock with a floor of zero, on this repository's pool.
    ///
    /// Collaborator surface for one-off adjustments. Checkout does NOT
    /// use this: it runs [`decrement_stock_clamped`] on its own
    /// transaction so all per-product decrements commit together.
    pub async fn decrement_stock(&self, id: &str, quantity: i64) -> DbResult<()> {
        let mut conn = self.pool.acquire().await?;
        decrement_stock_clamped(&mut conn, id, quantity).await
    }

    /// Restocks a product (additive inventory adjustment).
    pub async fn restock(&self, id: &str, quantity: i64) -> DbResult<()> {
        debug!(id = %id, quantity = %quantity, "Restocking product");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products
            SET stock = stock + ?2, updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(quantity)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts catalog entries (for diagnostics and seeding).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Decrements a product's stock with a floor of zero, on an explicit
/// connection.
///
/// Connection-scoped so the checkout coordinator can run every
/// per-product decrement inside one transaction. `MAX(stock - ?, 0)`
/// is SQLite's spelling of `GREATEST(stock - qty, 0)`.
///
/// ## Errors
/// * `DbError::NotFound` - no product row with that id (0 rows affected)
pub async fn decrement_stock_clamped(
    conn: &mut SqliteConnection,
    id: &str,
    quantity: i64,
) -> DbResult<()> {
    debug!(id = %id, quantity = %quantity, "Decrementing stock (clamped)");

    let now: DateTime<Utc> = Utc::now();

    let result = sqlx::query(
        r#"
        UPDATE products
        SET stock = MAX(stock - ?2, 0), updated_at = ?3
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .bind(quantity)
    .bind(now)
    .execute(conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Product", id));
    }

    Ok(())
}

/// Helper to generate a new product ID.
pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn test_product(name: &str, price_cents: i64, stock: i64) -> Product {
        let now = Utc::now();
        Product {
            id: generate_product_id(),
            name: name.to_string(),
            price_cents,
            stock,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = test_db().await;
        let repo = db.products();

        let espresso = test_product("espresso", 250, 50);
        repo.insert(&espresso).await.unwrap();

        let found = repo.get_by_id(&espresso.id).await.unwrap().unwrap();
        assert_eq!(found.name, "espresso");
        assert_eq!(found.price_cents, 250);
        assert_eq!(found.stock, 50);

        assert!(repo.get_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_rejects_invalid_fields() {
        let db = test_db().await;
        let repo = db.products();

        let empty_name = test_product("   ", 250, 50);
        let free_drink = test_product("espresso", 0, 50);
        let negative_stock = test_product("mocha", 375, -1);

        for bad in [&empty_name, &free_drink, &negative_stock] {
            let err = repo.insert(bad).await.unwrap_err();
            assert!(matches!(err, DbError::ConstraintViolation { .. }));
        }

        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_search_case_insensitive_substring() {
        let db = test_db().await;
        let repo = db.products();

        repo.insert(&test_product("espresso", 250, 50)).await.unwrap();
        repo.insert(&test_product("espresso macchiato", 200, 40))
            .await
            .unwrap();
        repo.insert(&test_product("mocha", 375, 25)).await.unwrap();

        let hits = repo.search("ESPRESSO", 20).await.unwrap();
        assert_eq!(hits.len(), 2);
        // Ordered by name
        assert_eq!(hits[0].name, "espresso");
        assert_eq!(hits[1].name, "espresso macchiato");

        // Empty term lists everything
        let all = repo.search("", 20).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_decrement_clamps_at_zero() {
        let db = test_db().await;
        let repo = db.products();

        let cortado = test_product("cortado", 450, 5);
        repo.insert(&cortado).await.unwrap();

        repo.decrement_stock(&cortado.id, 3).await.unwrap();
        let after = repo.get_by_id(&cortado.id).await.unwrap().unwrap();
        assert_eq!(after.stock, 2);

        // Over-demand floors at zero, never negative.
        repo.decrement_stock(&cortado.id, 10).await.unwrap();
        let after = repo.get_by_id(&cortado.id).await.unwrap().unwrap();
        assert_eq!(after.stock, 0);
    }

    #[tokio::test]
    async fn test_decrement_missing_product_is_not_found() {
        let db = test_db().await;
        let repo = db.products();

        let err = repo.decrement_stock("missing", 1).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_restock() {
        let db = test_db().await;
        let repo = db.products();

        let flat_white = test_product("flat white", 350, 8);
        repo.insert(&flat_white).await.unwrap();

        repo.restock(&flat_white.id, 12).await.unwrap();
        let after = repo.get_by_id(&flat_white.id).await.unwrap().unwrap();
        assert_eq!(after.stock, 20);
    }

    #[tokio::test]
    async fn test_count() {
        let db = test_db().await;
        let repo = db.products();

        assert_eq!(repo.count().await.unwrap(), 0);
        repo.insert(&test_product("espresso", 250, 50)).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
