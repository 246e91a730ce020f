//! Common regex patterns for receipt field extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Total amounts, in priority order
    pub static ref TOTAL: Regex = Regex::new(
        r"(?i)total[:\s]+\$?([0-9]+\.?[0-9]*)"
    ).unwrap();

    pub static ref GRAND_TOTAL: Regex = Regex::new(
        r"(?i)grand total[:\s]+\$?([0-9]+\.?[0-9]*)"
    ).unwrap();

    pub static ref AMOUNT: Regex = Regex::new(
        r"(?i)amount[:\s]+\$?([0-9]+\.?[0-9]*)"
    ).unwrap();

    // Dates, in priority order: 03/15/2024, 2024-03-15, Mar 15, 2024
    pub static ref DATE_SLASH: Regex = Regex::new(
        r"\d{1,2}/\d{1,2}/\d{2,4}"
    ).unwrap();

    pub static ref DATE_ISO: Regex = Regex::new(
        r"\d{4}-\d{2}-\d{2}"
    ).unwrap();

    pub static ref DATE_MONTH_NAME: Regex = Regex::new(
        r"(?i)\b(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\b\.?\s+\d{1,2},?\s+\d{4}"
    ).unwrap();
}
