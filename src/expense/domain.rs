//! Core expense domain types.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path},
};
use serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, Unexpected, Visitor},
};
use time::Date;

use crate::Error;

/// Database identifier for an expense.
pub type ExpenseId = i64;

/// A single spending record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID assigned by the database when the expense was created.
    pub id: ExpenseId,
    /// A short description of what the money was spent on.
    pub title: String,
    /// How much was spent.
    pub amount: f64,
    /// A free-form label for grouping expenses, e.g. "Food".
    pub category: String,
    /// The day the money was spent.
    pub date: Date,
}

impl Expense {
    /// Combine an ID with the fields from a create or update payload.
    pub fn new(id: ExpenseId, data: ExpenseData) -> Self {
        Self {
            id,
            title: data.title,
            amount: data.amount,
            category: data.category,
            date: data.date,
        }
    }
}

/// The payload for creating an expense or replacing all fields of an existing one.
///
/// Every field is required. The text fields may be empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseData {
    /// A short description of what the money was spent on.
    pub title: String,
    /// How much was spent. Accepts a JSON number or a string holding one, e.g. `"4.5"`.
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: f64,
    /// A free-form label for grouping expenses, e.g. "Food".
    pub category: String,
    /// The day the money was spent, as `YYYY-MM-DD`.
    pub date: Date,
}

fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    struct AmountVisitor;

    impl<'de> Visitor<'de> for AmountVisitor {
        type Value = f64;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a number or a numeric string")
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value)
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value as f64)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value as f64)
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            // Rust also parses "inf" and "NaN", which are not amounts.
            value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|amount| amount.is_finite())
                .ok_or_else(|| E::invalid_value(Unexpected::Str(value), &self))
        }
    }

    deserializer.deserialize_any(AmountVisitor)
}

/// A JSON body extractor that reports malformed payloads as [Error::Validation].
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(Error))]
pub struct ValidJson<T>(pub T);

/// A path extractor that reports malformed IDs as [Error::Validation].
#[derive(Debug, FromRequestParts)]
#[from_request(via(Path), rejection(Error))]
pub struct ValidPath<T>(pub T);

/// Render an amount the way it appears in prompts and reports.
///
/// Whole numbers keep one decimal place (`3200.0`), anything else uses the
/// shortest representation that round-trips (`4.5`). Amounts below `1e-4` or
/// from `1e16` upward use exponent notation with a signed, two-digit
/// exponent (`1e-05`, `1.5e+16`).
pub fn format_amount(amount: f64) -> String {
    if !amount.is_finite() {
        return amount.to_string();
    }

    let scientific = format!("{amount:e}");
    let parts = scientific
        .split_once('e')
        .and_then(|(mantissa, exponent)| Some((mantissa, exponent.parse::<i32>().ok()?)));

    if let Some((mantissa, exponent)) = parts {
        if amount != 0.0 && !(-4..16).contains(&exponent) {
            let sign = if exponent < 0 { '-' } else { '+' };
            return format!("{mantissa}e{sign}{:02}", exponent.abs());
        }
    }

    if amount.fract() == 0.0 {
        format!("{amount:.1}")
    } else {
        amount.to_string()
    }
}
