use crate::{error::DeliveryError, message_card::MessageCard};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt::Debug;

#[cfg(any(test, feature = "mocks"))]
use mockall::{automock, predicate::*};

pub const DEFAULT_TEXT: &str = "N/A";
pub const DEFAULT_CURRENCY: &str = "EUR";

#[cfg_attr(any(test, feature = "mocks"), automock)]
#[async_trait]
pub trait WebhookSender: Debug {
    async fn send(&self, url: &str, payload: &MessageCard) -> Result<(), DeliveryError>;
}

#[cfg_attr(any(test, feature = "mocks"), automock)]
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CreatedAt {
    Text(String),
    EpochMillis(f64),
}

/// The `data` of an order created event. Every field is optional.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderEvent {
    #[serde(default, deserialize_with = "text_field")]
    pub order_id: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub customer_name: Option<String>,
    #[serde(default, deserialize_with = "amount_field")]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "text_field")]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "created_at_field")]
    pub created_at: Option<CreatedAt>,
    #[serde(default, deserialize_with = "text_field")]
    pub source_system: Option<String>,
}

impl OrderEvent {
    /// Reads the event data out of an envelope's `data` value. Anything that
    /// is not a JSON object carries no order fields.
    pub fn from_data(data: Option<&Value>) -> Self {
        match data {
            Some(value @ Value::Object(_)) => serde_json::from_value(value.clone())
                .unwrap_or_else(|e| {
                    tracing::warn!("Ignoring unreadable order data: {}", e);
                    Self::default()
                }),
            Some(Value::Null) | None => Self::default(),
            Some(other) => {
                tracing::warn!("Event data is not an object, using defaults: {}", other);
                Self::default()
            }
        }
    }

    pub fn order_id(&self) -> &str {
        self.order_id.as_deref().unwrap_or(DEFAULT_TEXT)
    }

    pub fn customer_name(&self) -> &str {
        self.customer_name.as_deref().unwrap_or(DEFAULT_TEXT)
    }

    pub fn amount(&self) -> f64 {
        self.amount.unwrap_or(0.0)
    }

    pub fn currency(&self) -> &str {
        self.currency
            .as_deref()
            .filter(|currency| !currency.trim().is_empty())
            .unwrap_or(DEFAULT_CURRENCY)
    }

    pub fn source_system(&self) -> &str {
        self.source_system.as_deref().unwrap_or(DEFAULT_TEXT)
    }
}

// Facts are strings on the wire, so scalars are sent as their JSON text.
// `null` counts as absent and gets the field default.
fn text_field<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

fn amount_field<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::Number(number)) => Some(number.as_f64().unwrap_or(f64::NAN)),
        Some(Value::String(text)) if text.trim().is_empty() => Some(0.0),
        Some(Value::String(text)) => Some(text.trim().parse().unwrap_or(f64::NAN)),
        Some(Value::Bool(flag)) => Some(if flag { 1.0 } else { 0.0 }),
        Some(_) => Some(f64::NAN),
    })
}

// A `null` createdAt falls back to the current time like a missing one, it
// is not read as the Unix epoch.
fn created_at_field<'de, D>(deserializer: D) -> Result<Option<CreatedAt>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(CreatedAt::Text(text)),
        Some(Value::Number(number)) => Some(CreatedAt::EpochMillis(
            number.as_f64().unwrap_or(f64::NAN),
        )),
        Some(other) => Some(CreatedAt::Text(other.to_string())),
    })
}
