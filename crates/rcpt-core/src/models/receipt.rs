//! Receipt data models: the candidate record produced by extractors and the
//! normalized receipt handed to storage.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Unvalidated, possibly partial receipt data produced by an extraction strategy.
///
/// Every field is optional. A missing field means "not found", never zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateRecord {
    /// Store or merchant name.
    pub store_name: Option<String>,

    /// Store street address.
    pub store_address: Option<String>,

    /// Store phone number.
    pub store_phone: Option<String>,

    /// Date as printed on the receipt, not yet parsed.
    pub date: Option<String>,

    /// Transaction or receipt number.
    pub transaction_number: Option<String>,

    pub subtotal: Option<f64>,
    pub tax: Option<f64>,
    pub tips: Option<f64>,
    pub total: Option<f64>,

    /// ISO currency code, e.g. "USD".
    pub currency: Option<String>,

    /// Free-text payment method label.
    pub payment_method: Option<String>,

    /// Last four digits of the card used.
    pub card_last_four: Option<String>,

    /// Free-text category suggestion.
    pub category: Option<String>,

    #[serde(deserialize_with = "null_as_empty")]
    pub items: Vec<CandidateLineItem>,
}

/// Models sometimes answer `"items": null`; treat it like an empty list.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<CandidateLineItem>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<CandidateLineItem>>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_quantity<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64))
            .and_then(|q| u32::try_from(q).ok()),
        _ => None,
    }))
}

/// A line item as returned by an extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateLineItem {
    pub name: String,

    /// Whole, non-negative quantity. Anything else the model sends
    /// (`-1` on a refund line, `1.5`, `"two"`) reads as absent.
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub quantity: Option<u32>,

    #[serde(default)]
    pub price: Option<f64>,
}

impl CandidateLineItem {
    /// Quantity with the conventional reading of "absent" as one.
    pub fn effective_quantity(&self) -> u32 {
        self.quantity.unwrap_or(1)
    }
}

/// The canonical, persistence-ready receipt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_phone: Option<String>,

    /// Purchase date, absent when missing or unparseable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tips: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    pub payment_method: PaymentMethod,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_last_four: Option<String>,

    pub category: Category,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<LineItem>,
}

/// A single purchased item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,

    /// Quantity as printed. Absent means the receipt did not show one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
}

impl LineItem {
    /// Label for displaying the quantity, hidden when it is absent or one.
    pub fn quantity_label(&self) -> Option<String> {
        match self.quantity {
            Some(q) if q != 1 => Some(format!("x{}", q)),
            _ => None,
        }
    }

    /// Price multiplied by quantity, when the price is known.
    pub fn line_total(&self) -> Option<Decimal> {
        self.price
            .map(|p| p * Decimal::from(self.quantity.unwrap_or(1)))
    }
}

/// How a receipt was paid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentMethod {
    #[default]
    Unknown,
    Cash,
    CreditCard,
    DebitCard,
    ApplePay,
    GiftCard,
    Other,
}

impl PaymentMethod {
    /// Human-readable name.
    pub fn display(&self) -> &'static str {
        match self {
            PaymentMethod::Unknown => "Unknown",
            PaymentMethod::Cash => "Cash",
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::DebitCard => "Debit Card",
            PaymentMethod::ApplePay => "Apple Pay",
            PaymentMethod::GiftCard => "Gift Card",
            PaymentMethod::Other => "Other",
        }
    }
}

/// Spending category of a receipt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    #[default]
    Uncategorized,
    Groceries,
    Restaurant,
    Gas,
    Shopping,
    Entertainment,
    Travel,
    Healthcare,
    Utilities,
    Other,
}

impl Category {
    /// Human-readable name.
    pub fn display(&self) -> &'static str {
        match self {
            Category::Uncategorized => "Uncategorized",
            Category::Groceries => "Groceries",
            Category::Restaurant => "Restaurant",
            Category::Gas => "Gas",
            Category::Shopping => "Shopping",
            Category::Entertainment => "Entertainment",
            Category::Travel => "Travel",
            Category::Healthcare => "Healthcare",
            Category::Utilities => "Utilities",
            Category::Other => "Other",
        }
    }
}

impl Receipt {
    /// Check the receipt for gaps and inconsistencies.
    ///
    /// Issues are informational; a receipt with issues is still stored.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.store_name.is_none() {
            issues.push("Missing store name".to_string());
        }

        if self.date.is_none() {
            issues.push("Missing or unparseable date".to_string());
        }

        if self.total.is_none() {
            issues.push("Missing total".to_string());
        }

        // Items only add up when every price is known
        let line_totals: Option<Vec<Decimal>> =
            self.items.iter().map(LineItem::line_total).collect();

        if let (Some(subtotal), Some(totals)) = (self.subtotal, line_totals) {
            if !totals.is_empty() {
                let calculated: Decimal = totals.iter().sum();
                if (calculated - subtotal).abs() > Decimal::new(1, 2) {
                    issues.push(format!(
                        "Line item total ({}) differs from subtotal ({})",
                        calculated, subtotal
                    ));
                }
            }
        }

        if let (Some(subtotal), Some(total)) = (self.subtotal, self.total) {
            if subtotal > total {
                issues.push(format!(
                    "Subtotal ({}) exceeds total ({})",
                    subtotal, total
                ));
            }
        }

        issues
    }
}
