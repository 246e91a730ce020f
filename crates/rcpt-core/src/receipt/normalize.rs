//! Mapping of candidate records onto the canonical receipt.

use tracing::debug;

use crate::models::receipt::{CandidateLineItem, CandidateRecord, LineItem, Receipt};

use super::rules::{parse_receipt_date, resolve_category, resolve_payment_method, to_decimal};

/// Normalize a candidate record into a [`Receipt`].
///
/// Never fails and never invents data: anything missing or unparseable is
/// absent in the result, except payment method and category, which fall back
/// to `Unknown` and `Uncategorized`. Blank strings count as missing.
pub fn normalize(candidate: CandidateRecord) -> Receipt {
    let date = candidate.date.as_deref().and_then(parse_receipt_date);
    if date.is_none() {
        if let Some(raw) = &candidate.date {
            debug!("Could not parse receipt date {:?}", raw);
        }
    }

    let payment_method = resolve_payment_method(candidate.payment_method.as_deref());
    let category = resolve_category(candidate.category.as_deref());

    Receipt {
        store_name: non_blank(candidate.store_name),
        store_address: non_blank(candidate.store_address),
        store_phone: non_blank(candidate.store_phone),
        date,
        transaction_number: non_blank(candidate.transaction_number),
        subtotal: candidate.subtotal.and_then(to_decimal),
        tax: candidate.tax.and_then(to_decimal),
        tips: candidate.tips.and_then(to_decimal),
        total: candidate.total.and_then(to_decimal),
        currency: non_blank(candidate.currency),
        payment_method,
        card_last_four: non_blank(candidate.card_last_four),
        category,
        items: candidate.items.into_iter().map(normalize_item).collect(),
    }
}

fn normalize_item(item: CandidateLineItem) -> LineItem {
    LineItem {
        name: item.name.trim().to_string(),
        quantity: item.quantity,
        price: item.price.and_then(to_decimal),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
