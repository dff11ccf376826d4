use std::{cmp::Ordering, str::FromStr};

use serde_json::Value;
use uuid::Uuid;

use crate::{
    domain::{models::Document, traits::Entity},
    error::AppError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// One `field` / `-field` component of a sort expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

impl SortKey {
    /// Parses `"-createdAt name"` or `"-createdAt,name"`. Empty components are ignored.
    pub fn parse_list(raw: &str) -> Vec<SortKey> {
        raw.split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .filter_map(|part| part.parse().ok())
            .collect()
    }
}

impl FromStr for SortKey {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (direction, field) = match value.strip_prefix('-') {
            Some(rest) => (SortDirection::Desc, rest),
            None => (SortDirection::Asc, value.strip_prefix('+').unwrap_or(value)),
        };
        if field.is_empty() {
            return Err(AppError::Validation(format!("invalid sort field: {value}")));
        }
        Ok(Self {
            field: field.to_string(),
            direction,
        })
    }
}

pub fn parse_record_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::Validation("Invalid ID format".into()))
}

/// Orders two documents by the given keys; the first non-equal key decides.
pub fn compare_documents<T: Entity>(
    a: &Document<T>,
    b: &Document<T>,
    keys: &[SortKey],
    a_json: &Value,
    b_json: &Value,
) -> Ordering {
    for key in keys {
        let ordering = match key.field.as_str() {
            "createdAt" => a.created_at.cmp(&b.created_at),
            "updatedAt" => a.updated_at.cmp(&b.updated_at),
            "isActive" => a.is_active.cmp(&b.is_active),
            field => compare_values(a_json.get(field), b_json.get(field)),
        };
        let ordering = match key.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

fn rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Bool(_)) => 1,
        Some(Value::Number(_)) => 2,
        Some(Value::String(_)) => 3,
        Some(Value::Array(_)) => 4,
        Some(Value::Object(_)) => 5,
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or_default();
            let y = y.as_f64().unwrap_or_default();
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}
