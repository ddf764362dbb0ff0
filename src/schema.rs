//! Request bodies and query strings accepted by the expense API.
//!
//! Every field is optional at the serde layer so that a missing field is
//! reported as an invalid payload rather than a deserialization error.
//! Numeric fields also accept their value as a string (`"3.5"`, `"1"`), which
//! is what HTML forms tend to send.

use std::str::FromStr;

use serde::{de, Deserialize, Deserializer};

use crate::{
    error::ApiError,
    model::{ExpenseChange, ExpenseKey, NewExpense},
};

// Body of POST /add-expense
#[derive(Debug, Default, Deserialize)]
pub struct AddExpenseSchema {
    pub username: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "number_or_numeric_text")]
    pub amount: Option<f64>,
}

// Body of PUT /update-expense
#[derive(Debug, Default, Deserialize)]
pub struct UpdateExpenseSchema {
    #[serde(default, deserialize_with = "number_or_numeric_text")]
    pub id: Option<i64>,
    pub username: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "number_or_numeric_text")]
    pub amount: Option<f64>,
}

// Body of DELETE /delete-expense
#[derive(Debug, Default, Deserialize)]
pub struct DeleteExpenseSchema {
    #[serde(default, deserialize_with = "number_or_numeric_text")]
    pub id: Option<i64>,
    pub username: Option<String>,
}

// Query string of GET /get-expenses
#[derive(Debug, Default)]
pub struct ListExpensesQuery {
    pub username: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText<T> {
    Number(T),
    Text(String),
}

// `null` stays missing; text that is not a number is a type error.
fn number_or_numeric_text<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
{
    match Option::<NumberOrText<T>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(value)) => Ok(Some(value)),
        Some(NumberOrText::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("expected a number, got {:?}", text))),
    }
}

impl AddExpenseSchema {
    pub fn validate(self) -> Result<NewExpense, ApiError> {
        match self {
            AddExpenseSchema {
                username: Some(username),
                description: Some(description),
                amount: Some(amount),
            } => Ok(NewExpense {
                username,
                description,
                amount,
            }),
            _ => Err(ApiError::InvalidPayload),
        }
    }
}

impl UpdateExpenseSchema {
    pub fn validate(self) -> Result<ExpenseChange, ApiError> {
        match self {
            UpdateExpenseSchema {
                id: Some(id),
                username: Some(username),
                description: Some(description),
                amount: Some(amount),
            } => Ok(ExpenseChange {
                id,
                username,
                description,
                amount,
            }),
            _ => Err(ApiError::InvalidPayload),
        }
    }
}

impl DeleteExpenseSchema {
    pub fn validate(self) -> Result<ExpenseKey, ApiError> {
        match self {
            DeleteExpenseSchema {
                id: Some(id),
                username: Some(username),
            } => Ok(ExpenseKey { id, username }),
            _ => Err(ApiError::InvalidPayload),
        }
    }
}

impl ListExpensesQuery {
    /// A repeated `username` key resolves to its first value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self {
            username: pairs
                .into_iter()
                .find(|(key, _)| key == "username")
                .map(|(_, value)| value),
        }
    }

    /// An empty `username` is treated the same as a missing one.
    pub fn validate(self) -> Result<String, ApiError> {
        match self.username {
            Some(username) if !username.is_empty() => Ok(username),
            _ => Err(ApiError::UsernameRequired),
        }
    }
}
