use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::{
    config::Settings,
    models::{NewOrder, Order},
};

use super::db_init;

/// Handle to the order table. Cheap to clone; every clone shares one pool.
#[derive(Debug, Clone)]
pub struct OrderStore {
    pool: SqlitePool,
}

impl OrderStore {
    pub async fn connect(settings: &Settings) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(&settings.database_url)?.create_if_missing(true);

        // Each connection to an in-memory database sees its own empty database,
        // so keep exactly one alive for the lifetime of the pool.
        let pool_options = if settings.is_in_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(settings.db_max_connections)
        };

        let pool = pool_options.connect_with(options).await?;
        Ok(Self { pool })
    }

    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn init_schema(&self) -> Result<(), sqlx::Error> {
        db_init::ensure_schema(&self.pool).await
    }

    pub async fn drop_schema(&self) -> Result<(), sqlx::Error> {
        db_init::drop_schema(&self.pool).await
    }

    /// Drops and recreates the table. Used to isolate tests from each other.
    pub async fn reset(&self) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        db_init::drop_schema(&mut *tx).await?;
        db_init::ensure_schema(&mut *tx).await?;
        tx.commit().await
    }

    pub async fn create(&self, order: &NewOrder) -> Result<Order, sqlx::Error> {
        sqlx::query_as::<_, Order>(
            "INSERT INTO orders (symbol, quantity, price, order_type) \
             VALUES (?, ?, ?, ?) \
             RETURNING id, symbol, quantity, price, order_type",
        )
        .bind(&order.symbol)
        .bind(order.quantity)
        .bind(order.price)
        .bind(order.order_type.as_str())
        .fetch_one(&self.pool)
        .await
    }

    pub async fn list(&self) -> Result<Vec<Order>, sqlx::Error> {
        sqlx::query_as::<_, Order>(
            "SELECT id, symbol, quantity, price, order_type FROM orders ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Optionally drops the table, then closes the pool even if the drop failed.
    pub async fn shutdown(&self, drop_schema: bool) -> Result<(), sqlx::Error> {
        let dropped = if drop_schema {
            self.drop_schema().await
        } else {
            Ok(())
        };
        if dropped.is_ok() && drop_schema {
            tracing::info!("order table dropped");
        }
        self.close().await;
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderType;

    async fn store() -> OrderStore {
        let store = OrderStore::connect(&Settings::for_tests()).await.unwrap();
        store.init_schema().await.unwrap();
        store
    }

    fn new_order(symbol: &str) -> NewOrder {
        NewOrder {
            symbol: symbol.to_string(),
            quantity: 3,
            price: 2800.0,
            order_type: OrderType::Buy,
        }
    }

    #[tokio::test]
    async fn list_on_empty_store_is_empty() {
        let store = store().await;
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_assigns_increasing_ids() {
        let store = store().await;

        let first = store.create(&new_order("GOOGL")).await.unwrap();
        let second = store.create(&new_order("GOOGL")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(second.symbol, "GOOGL");
        assert_eq!(second.order_type, OrderType::Buy);

        let listed = store.list().await.unwrap();
        assert_eq!(listed, vec![first, second]);
    }

    #[tokio::test]
    async fn reset_clears_rows_and_restarts_ids() {
        let store = store().await;
        store.create(&new_order("A")).await.unwrap();
        store.create(&new_order("B")).await.unwrap();

        store.reset().await.unwrap();
        assert!(store.list().await.unwrap().is_empty());

        let fresh = store.create(&new_order("C")).await.unwrap();
        assert_eq!(fresh.id, 1);
    }

    #[tokio::test]
    async fn shutdown_reports_drop_failure_and_still_closes() {
        let store = store().await;
        store.close().await;

        assert!(matches!(store.shutdown(true).await, Err(sqlx::Error::PoolClosed)));
        assert!(store.pool.is_closed());
    }

    #[tokio::test]
    async fn shutdown_without_drop_closes_pool() {
        let store = store().await;
        assert!(store.shutdown(false).await.is_ok());
        assert!(store.pool.is_closed());
    }

    #[tokio::test]
    async fn shutdown_with_drop_closes_pool() {
        let store = store().await;
        store.create(&new_order("A")).await.unwrap();

        let observer = store.clone();
        store.shutdown(true).await.unwrap();
        assert!(observer.pool.is_closed());
    }

    #[tokio::test]
    async fn operations_fail_after_drop() {
        let store = store().await;
        store.drop_schema().await.unwrap();

        assert!(store.list().await.is_err());
        assert!(store.create(&new_order("A")).await.is_err());
    }
}
