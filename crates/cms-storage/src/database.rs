//! SQLite-backed contact store.
//!
//! [`SqliteContactStore`] wraps a `sqlx::SqlitePool`. Opening the store
//! bootstraps the `contacts` table if it does not exist; `contact_id` is an
//! `INTEGER PRIMARY KEY AUTOINCREMENT`, so identifiers are never reused.
//!
//! SQLite's `LOWER()` folds ASCII only, so every row also carries
//! `name_search` / `email_search` columns holding the Unicode-lowercased
//! text. Searches match against those.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use cms_core::{Contact, ContactId, Page, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Executor, FromRow, QueryBuilder, Sqlite};

use crate::query::{ContactQuery, fold_case};
use crate::traits::{ContactMutation, ContactStore};

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS contacts (
    contact_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name         TEXT NOT NULL,
    email        TEXT NOT NULL,
    phone        TEXT,
    name_search  TEXT NOT NULL,
    email_search TEXT NOT NULL
)
"#;

/// Starts a write transaction holding the write lock from the outset, so
/// concurrent writers wait on the busy timeout instead of failing when a
/// read lock cannot be upgraded.
const BEGIN_WRITE: &str = "BEGIN IMMEDIATE";

/// How long a connection waits for a competing writer.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SELECT_COLUMNS: &str = "SELECT contact_id, name, email, phone FROM contacts";

#[derive(Debug, FromRow)]
struct ContactRow {
    contact_id: i64,
    name: String,
    email: String,
    phone: Option<String>,
}

impl From<ContactRow> for Contact {
    fn from(row: ContactRow) -> Self {
        Self {
            contact_id: Some(ContactId::new(row.contact_id)),
            name: row.name,
            email: row.email,
            phone: row.phone,
        }
    }
}

/// Contact store persisted in SQLite.
#[derive(Debug, Clone)]
pub struct SqliteContactStore {
    pool: SqlitePool,
}

impl SqliteContactStore {
    /// Connects to `url` and bootstraps the schema.
    ///
    /// The database file is created if missing. In-memory URLs
    /// (`sqlite::memory:`) are limited to a single connection so every
    /// query sees the same database.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .busy_timeout(BUSY_TIMEOUT);
        let max_connections = if url.contains(":memory:") {
            1
        } else {
            max_connections.max(1)
        };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;
        tracing::info!(url = %url, max_connections, "Connected to SQLite contact store");
        Self::from_pool(pool).await
    }

    /// Wraps an existing pool and bootstraps the schema.
    pub async fn from_pool(pool: SqlitePool) -> Result<Self> {
        pool.execute(CREATE_TABLE).await?;
        let store = Self { pool };
        store.add_search_columns().await?;
        Ok(store)
    }

    /// Adds and fills the folded search columns on a `contacts` table created
    /// before they existed.
    async fn add_search_columns(&self) -> Result<()> {
        let present: i64 = sqlx::query_scalar(
            "SELECT COUNT(1) FROM pragma_table_info('contacts') WHERE name = 'name_search'",
        )
        .fetch_one(&self.pool)
        .await?;
        if present > 0 {
            return Ok(());
        }

        let mut tx = self.pool.begin_with(BEGIN_WRITE).await?;
        sqlx::query("ALTER TABLE contacts ADD COLUMN name_search TEXT NOT NULL DEFAULT ''")
            .execute(&mut *tx)
            .await?;
        sqlx::query("ALTER TABLE contacts ADD COLUMN email_search TEXT NOT NULL DEFAULT ''")
            .execute(&mut *tx)
            .await?;
        let rows = sqlx::query_as::<_, ContactRow>(SELECT_COLUMNS)
            .fetch_all(&mut *tx)
            .await?;
        let count = rows.len();
        for row in rows {
            sqlx::query(
                "UPDATE contacts SET name_search = ?, email_search = ? WHERE contact_id = ?",
            )
            .bind(fold_case(&row.name))
            .bind(fold_case(&row.email))
            .bind(row.contact_id)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        tracing::info!(rows = count, "Added search columns to contacts table");
        Ok(())
    }

    /// Underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

async fn fetch_by_id<'e, E>(executor: E, id: ContactId) -> Result<Option<Contact>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query_as::<_, ContactRow>(
        "SELECT contact_id, name, email, phone FROM contacts WHERE contact_id = ?",
    )
    .bind(id.get())
    .fetch_optional(executor)
    .await?;
    Ok(row.map(Contact::from))
}

async fn upsert<'e, E>(executor: E, contact: Contact) -> Result<Contact>
where
    E: Executor<'e, Database = Sqlite>,
{
    match contact.contact_id {
        None => {
            let result =
                sqlx::query(
                    "INSERT INTO contacts (name, email, phone, name_search, email_search) \
                     VALUES (?, ?, ?, ?, ?)",
                )
                .bind(&contact.name)
                .bind(&contact.email)
                .bind(&contact.phone)
                .bind(fold_case(&contact.name))
                .bind(fold_case(&contact.email))
                .execute(executor)
                .await?;
            Ok(Contact {
                contact_id: Some(ContactId::new(result.last_insert_rowid())),
                ..contact
            })
        }
        Some(id) => {
            sqlx::query(
                "INSERT INTO contacts (contact_id, name, email, phone, name_search, email_search) \
                 VALUES (?, ?, ?, ?, ?, ?) \
                 ON CONFLICT(contact_id) DO UPDATE SET \
                 name = excluded.name, email = excluded.email, phone = excluded.phone, \
                 name_search = excluded.name_search, email_search = excluded.email_search",
            )
            .bind(id.get())
            .bind(&contact.name)
            .bind(&contact.email)
            .bind(&contact.phone)
            .bind(fold_case(&contact.name))
            .bind(fold_case(&contact.email))
            .execute(executor)
            .await?;
            Ok(contact)
        }
    }
}

#[async_trait]
impl ContactStore for SqliteContactStore {
    async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>> {
        fetch_by_id(&self.pool, id).await
    }

    async fn exists_by_id(&self, id: ContactId) -> Result<bool> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(1) FROM contacts WHERE contact_id = ?")
                .bind(id.get())
                .fetch_one(&self.pool)
                .await?;
        Ok(count > 0)
    }

    async fn save(&self, contact: Contact) -> Result<Contact> {
        let saved = upsert(&self.pool, contact).await?;
        tracing::debug!(contact_id = ?saved.contact_id, "Saved contact row");
        Ok(saved)
    }

    async fn delete_by_id(&self, id: ContactId) -> Result<()> {
        let result = sqlx::query("DELETE FROM contacts WHERE contact_id = ?")
            .bind(id.get())
            .execute(&self.pool)
            .await?;
        tracing::debug!(contact_id = %id, rows = result.rows_affected(), "Deleted contact row");
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Contact>> {
        let rows = sqlx::query_as::<_, ContactRow>(SELECT_COLUMNS)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Contact::from).collect())
    }

    async fn find_all_paged_filtered(&self, query: &ContactQuery) -> Result<Page<Contact>> {
        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(1) FROM contacts");
        query.push_where(&mut count);
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        let mut select = QueryBuilder::<Sqlite>::new(SELECT_COLUMNS);
        query.push_where(&mut select);
        query.push_order_and_limit(&mut select);
        let rows: Vec<ContactRow> = select.build_query_as().fetch_all(&self.pool).await?;

        tracing::debug!(
            total,
            returned = rows.len(),
            filtered = query.filter().is_some(),
            "Executed paged contact scan"
        );

        let content = rows.into_iter().map(Contact::from).collect();
        Ok(Page::new(
            content,
            query.page_request(),
            u64::try_from(total).unwrap_or_default(),
        ))
    }

    async fn update_in_transaction(
        &self,
        id: ContactId,
        mutation: ContactMutation<'_>,
    ) -> Result<Option<Contact>> {
        let mut tx = self.pool.begin_with(BEGIN_WRITE).await?;
        let Some(mut contact) = fetch_by_id(&mut *tx, id).await? else {
            tx.rollback().await?;
            return Ok(None);
        };
        mutation(&mut contact);
        contact.contact_id = Some(id);
        let saved = upsert(&mut *tx, contact).await?;
        tx.commit().await?;
        Ok(Some(saved))
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}
