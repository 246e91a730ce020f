//! Resolution of free-text labels into payment method and category enums.
//!
//! Both tables are ordered: the first entry whose needle occurs in the
//! lower-cased label wins, so "credit or other" is a credit card.

use crate::models::receipt::{Category, PaymentMethod};

/// Payment method needles, in priority order.
pub const PAYMENT_METHOD_RULES: &[(&str, PaymentMethod)] = &[
    ("cash", PaymentMethod::Cash),
    ("credit", PaymentMethod::CreditCard),
    ("debit", PaymentMethod::DebitCard),
    ("apple", PaymentMethod::ApplePay),
    ("gift", PaymentMethod::GiftCard),
    ("other", PaymentMethod::Other),
];

/// Category needles, in priority order.
pub const CATEGORY_RULES: &[(&[&str], Category)] = &[
    (&["grocer"], Category::Groceries),
    (&["restaurant", "food", "dining"], Category::Restaurant),
    (&["gas", "fuel"], Category::Gas),
    (&["shop", "retail"], Category::Shopping),
    (&["entertain", "movie"], Category::Entertainment),
    (&["travel", "hotel", "flight"], Category::Travel),
    (&["health", "medical", "pharmacy"], Category::Healthcare),
    (&["utilit", "electric", "water"], Category::Utilities),
    (&["other"], Category::Other),
];

/// Resolve a payment method label, defaulting to [`PaymentMethod::Unknown`].
pub fn resolve_payment_method(label: Option<&str>) -> PaymentMethod {
    let Some(label) = label else {
        return PaymentMethod::Unknown;
    };
    let label = label.to_lowercase();

    PAYMENT_METHOD_RULES
        .iter()
        .find(|(needle, _)| label.contains(needle))
        .map(|(_, method)| *method)
        .unwrap_or_default()
}

/// Resolve a category label, defaulting to [`Category::Uncategorized`].
pub fn resolve_category(label: Option<&str>) -> Category {
    let Some(label) = label else {
        return Category::Uncategorized;
    };
    let label = label.to_lowercase();

    CATEGORY_RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| label.contains(n)))
        .map(|(_, category)| *category)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_basic() {
        assert_eq!(resolve_payment_method(Some("CASH")), PaymentMethod::Cash);
        assert_eq!(resolve_payment_method(Some("Visa Credit")), PaymentMethod::CreditCard);
        assert_eq!(resolve_payment_method(Some("Debit card")), PaymentMethod::DebitCard);
        assert_eq!(resolve_payment_method(Some("Apple Pay")), PaymentMethod::ApplePay);
        assert_eq!(resolve_payment_method(Some("Gift Card")), PaymentMethod::GiftCard);
        assert_eq!(resolve_payment_method(Some("other")), PaymentMethod::Other);
    }

    #[test]
    fn test_payment_method_precedence() {
        assert_eq!(
            resolve_payment_method(Some("Credit or Other")),
            PaymentMethod::CreditCard
        );
        // "cash" is tested before "gift"
        assert_eq!(
            resolve_payment_method(Some("gift card + cash")),
            PaymentMethod::Cash
        );
    }

    #[test]
    fn test_payment_method_unknown() {
        assert_eq!(resolve_payment_method(None), PaymentMethod::Unknown);
        assert_eq!(resolve_payment_method(Some("")), PaymentMethod::Unknown);
        assert_eq!(resolve_payment_method(Some("bitcoin")), PaymentMethod::Unknown);
    }

    #[test]
    fn test_category_basic() {
        assert_eq!(resolve_category(Some("Grocery")), Category::Groceries);
        assert_eq!(resolve_category(Some("Fast Food")), Category::Restaurant);
        assert_eq!(resolve_category(Some("Fuel")), Category::Gas);
        assert_eq!(resolve_category(Some("Retail")), Category::Shopping);
        assert_eq!(resolve_category(Some("Movies")), Category::Entertainment);
        assert_eq!(resolve_category(Some("Hotel")), Category::Travel);
        assert_eq!(resolve_category(Some("Pharmacy")), Category::Healthcare);
        assert_eq!(resolve_category(Some("Electricity")), Category::Utilities);
        assert_eq!(resolve_category(Some("Other")), Category::Other);
    }

    #[test]
    fn test_category_precedence() {
        // "food" (restaurant) is listed before "shop" (shopping)
        assert_eq!(resolve_category(Some("food shop")), Category::Restaurant);
        // "grocer" comes first of all
        assert_eq!(resolve_category(Some("grocery and gas")), Category::Groceries);
    }

    #[test]
    fn test_category_uncategorized() {
        assert_eq!(resolve_category(None), Category::Uncategorized);
        assert_eq!(resolve_category(Some("misc")), Category::Uncategorized);
    }
}
