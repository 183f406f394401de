//! Human-readable renderings of listing fields.

const CRORE: f64 = 10_000_000.0;
const LAKH: f64 = 100_000.0;

/// Render a rupee amount in crores (one decimal) from 1 Cr upwards,
/// in whole lakhs below that.
pub fn format_price(price: i64) -> String {
    let price = price as f64;
    if price >= CRORE {
        format!("₹{:.1}Cr", price / CRORE)
    } else {
        format!("₹{:.0}L", price / LAKH)
    }
}

pub fn format_area(area: i64) -> String {
    format!("{} sq.ft", group_thousands(area))
}

/// Rounded to whole rupees
pub fn format_price_per_sq_ft(value: f64) -> String {
    format!("₹{}/sq.ft", group_thousands(value.round() as i64))
}

/// `"2BHK"` becomes `"2 BHK"`; other codes pass through.
pub fn property_type_display(code: &str) -> &str {
    match code {
        "1BHK" => "1 BHK",
        "2BHK" => "2 BHK",
        "3BHK" => "3 BHK",
        "4BHK" => "4 BHK",
        other => other,
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::{format_area, format_price, format_price_per_sq_ft, property_type_display};

    #[test]
    fn price_bands() {
        assert_eq!(format_price(10_000_000), "₹1.0Cr");
        assert_eq!(format_price(12_600_000), "₹1.3Cr");
        assert_eq!(format_price(157_000_000), "₹15.7Cr");
        assert_eq!(format_price(9_999_999), "₹100L");
        assert_eq!(format_price(9_500_000), "₹95L");
        assert_eq!(format_price(4_520_000), "₹45L");
        assert_eq!(format_price(0), "₹0L");
    }

    #[test]
    fn exact_halves_round_to_even() {
        assert_eq!(format_price(9_850_000), "₹98L");
        assert_eq!(format_price(9_950_000), "₹100L");
        assert_eq!(format_price(12_500_000), "₹1.2Cr");
    }

    #[test]
    fn area_grouping() {
        assert_eq!(format_area(1_234_567), "1,234,567 sq.ft");
        assert_eq!(format_area(950), "950 sq.ft");
        assert_eq!(format_area(1000), "1,000 sq.ft");
        assert_eq!(format_area(0), "0 sq.ft");
        assert_eq!(format_area(-12_000), "-12,000 sq.ft");
    }

    #[test]
    fn price_per_sq_ft() {
        assert_eq!(format_price_per_sq_ft(18_250.0), "₹18,250/sq.ft");
        assert_eq!(format_price_per_sq_ft(5555.56), "₹5,556/sq.ft");
    }

    #[test]
    fn bhk_codes() {
        assert_eq!(property_type_display("1BHK"), "1 BHK");
        assert_eq!(property_type_display("3BHK"), "3 BHK");
        assert_eq!(property_type_display("4BHK"), "4 BHK");
        assert_eq!(property_type_display("5BHK"), "5BHK");
        assert_eq!(property_type_display("Studio"), "Studio");
    }
}
