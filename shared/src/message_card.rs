use crate::{core::OrderEvent, money::format_currency, timestamp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const CARD_TYPE: &str = "MessageCard";
pub const CARD_CONTEXT: &str = "https://schema.org/extensions";
pub const THEME_COLOR: &str = "0078D4";
pub const ACTIVITY_TITLE: &str = "📦 New Order Created";

/// Teams `MessageCard` payload. Field names are the connector's wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageCard {
    #[serde(rename = "@type")]
    pub card_type: String,
    #[serde(rename = "@context")]
    pub context: String,
    pub theme_color: String,
    pub summary: String,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub activity_title: String,
    pub activity_subtitle: String,
    pub facts: Vec<Fact>,
    pub markdown: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    pub name: String,
    pub value: String,
}

impl Fact {
    fn new(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
        }
    }
}

/// Builds the order notification card. `now` stands in for a missing
/// `createdAt`.
pub fn build_message(data: &OrderEvent, now: DateTime<Utc>) -> MessageCard {
    let order_id = data.order_id();
    let source_system = data.source_system();
    let formatted_amount = format_currency(data.amount(), data.currency());

    let created_at = match &data.created_at {
        None => timestamp::to_utc_string(&now),
        Some(created_at) => match timestamp::resolve(created_at) {
            Some(instant) => timestamp::to_utc_string(&instant),
            None => {
                // Kept as a marker instead of an error; consumers may rely on it.
                tracing::warn!(
                    "Unparseable createdAt {:?} for order {}",
                    created_at,
                    order_id
                );
                timestamp::INVALID_DATE.to_string()
            }
        },
    };

    MessageCard {
        card_type: CARD_TYPE.to_string(),
        context: CARD_CONTEXT.to_string(),
        theme_color: THEME_COLOR.to_string(),
        summary: format!("New Order Created: {}", order_id),
        sections: vec![Section {
            activity_title: ACTIVITY_TITLE.to_string(),
            activity_subtitle: format!("Source: {}", source_system),
            facts: vec![
                Fact::new("Order ID", order_id),
                Fact::new("Customer", data.customer_name()),
                Fact::new("Amount", formatted_amount),
                Fact::new("Created At", created_at),
                Fact::new("Source System", source_system),
            ],
            markdown: true,
        }],
    }
}
