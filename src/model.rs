use chrono::{DateTime, Utc};

// A single spending entry owned by a username
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, serde::Serialize, serde::Deserialize)]
pub struct Expense {
    pub id: i64,
    pub username: String,
    pub description: String,
    pub amount: f64,
    pub date: DateTime<Utc>,
}

// Validated input for inserting a row
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub username: String,
    pub description: String,
    pub amount: f64,
}

// Validated input for rewriting a row in place
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseChange {
    pub id: i64,
    pub username: String,
    pub description: String,
    pub amount: f64,
}

// Identifies a row by id and owner
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseKey {
    pub id: i64,
    pub username: String,
}
