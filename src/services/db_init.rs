use sqlx::{Executor, Sqlite};

const CREATE_ORDERS: &str = "\
CREATE TABLE IF NOT EXISTS orders (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    symbol     TEXT    NOT NULL,
    quantity   INTEGER NOT NULL,
    price      REAL    NOT NULL,
    order_type TEXT    NOT NULL
)";

const DROP_ORDERS: &str = "DROP TABLE IF EXISTS orders";

pub async fn ensure_schema<'c, E>(conn: E) -> Result<(), sqlx::Error>
where
    E: Executor<'c, Database = Sqlite>,
{
    conn.execute(CREATE_ORDERS).await?;
    Ok(())
}

// Dropping an AUTOINCREMENT table also clears its sqlite_sequence row,
// so identities restart at 1 once the table is recreated.
pub async fn drop_schema<'c, E>(conn: E) -> Result<(), sqlx::Error>
where
    E: Executor<'c, Database = Sqlite>,
{
    conn.execute(DROP_ORDERS).await?;
    Ok(())
}
