//! Field-level validation for order submissions.
//!
//! Works on the raw JSON body rather than a typed extractor so that every
//! failing field is reported at once, each with its location and a
//! machine-readable kind.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::{NewOrder, OrderType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl FieldError {
    fn body(kind: &'static str, msg: impl Into<String>) -> Self {
        FieldError {
            loc: vec!["body".to_string()],
            msg: msg.into(),
            kind,
        }
    }

    fn field(field: &str, kind: &'static str, msg: impl Into<String>) -> Self {
        FieldError {
            loc: vec!["body".to_string(), field.to_string()],
            msg: msg.into(),
            kind,
        }
    }

    /// Name of the offending field, `None` for whole-body errors.
    pub fn field_name(&self) -> Option<&str> {
        self.loc.get(1).map(String::as_str)
    }
}

pub type FieldErrors = Vec<FieldError>;

/// Parses a request body and validates it as an order submission.
pub fn parse_order_body(bytes: &[u8]) -> Result<NewOrder, FieldErrors> {
    let body: Value = serde_json::from_slice(bytes)
        .map_err(|e| vec![FieldError::body("json_invalid", format!("JSON decode error: {e}"))])?;
    validate_order(&body)
}

pub fn validate_order(body: &Value) -> Result<NewOrder, FieldErrors> {
    let Some(obj) = body.as_object() else {
        return Err(vec![FieldError::body(
            "model_type",
            "Input should be a valid dictionary or object to extract fields from",
        )]);
    };

    let symbol = symbol(obj);
    let quantity = quantity(obj);
    let price = price(obj);
    let order_type = order_type(obj);

    match (symbol, quantity, price, order_type) {
        (Ok(symbol), Ok(quantity), Ok(price), Ok(order_type)) => Ok(NewOrder {
            symbol,
            quantity,
            price,
            order_type,
        }),
        (symbol, quantity, price, order_type) => {
            let errs: FieldErrors = [symbol.err(), quantity.err(), price.err(), order_type.err()]
                .into_iter()
                .flatten()
                .collect();
            Err(errs)
        }
    }
}

fn required<'a>(obj: &'a Map<String, Value>, field: &str) -> Result<&'a Value, FieldError> {
    obj.get(field)
        .ok_or_else(|| FieldError::field(field, "missing", "Field required"))
}

fn symbol(obj: &Map<String, Value>) -> Result<String, FieldError> {
    let Value::String(s) = required(obj, "symbol")? else {
        return Err(FieldError::field("symbol", "string_type", "Input should be a valid string"));
    };
    if s.is_empty() {
        return Err(FieldError::field(
            "symbol",
            "string_too_short",
            "String should have at least 1 character",
        ));
    }
    Ok(s.clone())
}

// Integers may also arrive as whole floats (`10.0`) or numeric strings (`"10"`).
fn as_whole_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            let f = n.as_f64()?;
            // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound.
            (f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64).then_some(f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn as_finite_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

fn quantity(obj: &Map<String, Value>) -> Result<i64, FieldError> {
    let Some(qty) = as_whole_i64(required(obj, "quantity")?) else {
        return Err(FieldError::field("quantity", "int_type", "Input should be a valid integer"));
    };
    if qty <= 0 {
        return Err(FieldError::field("quantity", "greater_than", "Input should be greater than 0"));
    }
    Ok(qty)
}

fn price(obj: &Map<String, Value>) -> Result<f64, FieldError> {
    let Some(price) = as_finite_f64(required(obj, "price")?) else {
        return Err(FieldError::field("price", "float_type", "Input should be a valid number"));
    };
    if price <= 0.0 {
        return Err(FieldError::field("price", "greater_than", "Input should be greater than 0"));
    }
    Ok(price)
}

fn order_type(obj: &Map<String, Value>) -> Result<OrderType, FieldError> {
    let Value::String(s) = required(obj, "order_type")? else {
        return Err(FieldError::field("order_type", "string_type", "Input should be a valid string"));
    };
    s.parse::<OrderType>().map_err(|_| {
        FieldError::field(
            "order_type",
            "string_pattern_mismatch",
            "String should match pattern '^(buy|sell)$'",
        )
    })
}
