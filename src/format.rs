//! Currency and date formatting for display.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};
use time::Month;

use crate::iso_date::IsoDate;

/// The currency symbol for Philippine pesos.
pub const CURRENCY_SYMBOL: &str = "₱";

/// numfmt switches to scientific notation from here on.
const LARGEST_NUMFMT_AMOUNT: f64 = 1e12;

/// Format `number` as pesos rounded to two decimal places, e.g. "₱1,234.50".
pub fn format_currency(number: f64) -> String {
    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency(CURRENCY_SYMBOL)
            .expect("currency symbol should be a valid prefix")
            .precision(Precision::Decimals(2))
    });

    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::currency(&format!("-{CURRENCY_SYMBOL}"))
            .expect("negative currency symbol should be a valid prefix")
            .precision(Precision::Decimals(2))
    });

    // numfmt cuts off extra decimals instead of rounding them
    let rounded = (number * 100.0).round() / 100.0;

    if !rounded.is_finite() || rounded == 0.0 {
        // numfmt renders zero as "0" without the prefix
        return format!("{CURRENCY_SYMBOL}0.00");
    }

    if rounded.abs() >= LARGEST_NUMFMT_AMOUNT {
        return format_large_currency(rounded);
    }

    let formatted_string = if rounded < 0.0 {
        negative_fmt.fmt_string(rounded.abs())
    } else {
        positive_fmt.fmt_string(rounded)
    };

    pad_decimals(formatted_string)
}

/// numfmt drops trailing zeros from the fraction, e.g. "12.30" comes out as
/// "12.3" and "12.00" as "12".
fn pad_decimals(formatted_string: String) -> String {
    match formatted_string.rfind('.') {
        None => format!("{formatted_string}.00"),
        Some(dot) if formatted_string.len() - dot == 2 => format!("{formatted_string}0"),
        Some(_) => formatted_string,
    }
}

/// Group the pesos of an amount too large for numfmt, e.g. "₱1,000,000,000,000.00".
fn format_large_currency(rounded: f64) -> String {
    let digits = format!("{:.2}", rounded.abs());
    let (pesos, centavos) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(pesos.len() + pesos.len() / 3);
    for (index, digit) in pesos.chars().enumerate() {
        if index > 0 && (pesos.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}{CURRENCY_SYMBOL}{grouped}.{centavos}")
}

/// Format a date as e.g. "May 1, 2024".
///
/// Strings that are not valid dates are returned as-is.
pub fn format_date_label(date: &IsoDate) -> String {
    match date.to_date() {
        Some(date) => format!(
            "{} {}, {}",
            month_abbrev(date.month()),
            date.day(),
            date.year()
        ),
        None => date.as_str().to_owned(),
    }
}

fn month_abbrev(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}
