//! Display helpers shared by the list views.

use chrono::NaiveDate;

/// Format a value as Brazilian reais: `R$ 1.234,56`.
pub fn format_currency(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}R$ {grouped},{fraction:02}")
}

/// Currency, or `-` when there is no value.
pub fn format_optional_currency(value: Option<f64>) -> String {
    value.map(format_currency).unwrap_or_else(|| "-".to_string())
}

/// `dd/mm/yyyy`, or `-` when there is no date.
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Stock badge colour bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    Ok,
    Low,
    Out,
}

impl StockLevel {
    pub fn of(stock: i64) -> Self {
        match stock {
            s if s > 10 => StockLevel::Ok,
            s if s > 0 => StockLevel::Low,
            _ => StockLevel::Out,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            StockLevel::Ok => "badge badge--ok",
            StockLevel::Low => "badge badge--low",
            StockLevel::Out => "badge badge--out",
        }
    }
}
