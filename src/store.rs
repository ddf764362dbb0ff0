//! The four statements behind the expense endpoints.
//!
//! Each call takes its own connection from [`Database::acquire`] and gives it
//! back before returning, whether the statement succeeded or not.

use chrono::{DateTime, Utc};
use sqlx::{query, query_as};
use tracing::debug;

use crate::{
    db::Database,
    error::StoreError,
    model::{Expense, ExpenseChange, ExpenseKey, NewExpense},
};

#[derive(Debug, Clone)]
pub struct ExpenseStore {
    db: Database,
}

impl ExpenseStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        self.db.ping().await
    }

    pub async fn insert(&self, expense: &NewExpense, date: DateTime<Utc>) -> Result<(), StoreError> {
        let mut conn = self.db.acquire().await?;
        let result = query(
            "INSERT INTO expenses (username, description, amount, date) VALUES (?, ?, ?, ?)",
        )
        .bind(&expense.username)
        .bind(&expense.description)
        .bind(expense.amount)
        .bind(date)
        .execute(&mut *conn)
        .await;
        conn.release().await;

        let done = result?;
        debug!(id = done.last_insert_rowid(), username = %expense.username, "expense inserted");
        Ok(())
    }

    /// Rows come back in whatever order the store yields them.
    pub async fn list_for_user(&self, username: &str) -> Result<Vec<Expense>, StoreError> {
        let mut conn = self.db.acquire().await?;
        let result = query_as::<_, Expense>(
            "SELECT id, username, description, amount, date FROM expenses WHERE username = ?",
        )
        .bind(username)
        .fetch_all(&mut *conn)
        .await;
        conn.release().await;

        Ok(result?)
    }

    /// Returns the number of rows touched, which is zero when `(id, username)`
    /// matches nothing.
    pub async fn update(&self, change: &ExpenseChange, date: DateTime<Utc>) -> Result<u64, StoreError> {
        let mut conn = self.db.acquire().await?;
        let result = query(
            "UPDATE expenses SET description = ?, amount = ?, date = ? WHERE id = ? AND username = ?",
        )
        .bind(&change.description)
        .bind(change.amount)
        .bind(date)
        .bind(change.id)
        .bind(&change.username)
        .execute(&mut *conn)
        .await;
        conn.release().await;

        Ok(result?.rows_affected())
    }

    pub async fn delete(&self, key: &ExpenseKey) -> Result<u64, StoreError> {
        let mut conn = self.db.acquire().await?;
        let result = query("DELETE FROM expenses WHERE id = ? AND username = ?")
            .bind(key.id)
            .bind(&key.username)
            .execute(&mut *conn)
            .await;
        conn.release().await;

        Ok(result?.rows_affected())
    }
}
