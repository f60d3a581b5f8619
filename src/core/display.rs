//! Text rendering for the calculator front end.

use crate::domain::model::{InputField, InputRecord, RoiProjection};

pub const CLOSING_NOTE: &str = "Finally finishing your book: priceless";

/// Grouped en-US rendering with at most three fraction digits
/// (`80000` → `80,000`, `1234.5` → `1,234.5`).
pub fn format_gross_revenue(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let symbol = if value > 0.0 { "∞" } else { "-∞" };
        return symbol.to_string();
    }

    let (int_part, frac_part) = round_half_away(value.abs(), 3);
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::new();
    if value < 0.0 && (int_part != "0" || !frac_part.is_empty()) {
        out.push('-');
    }
    out.push_str(&group_thousands(&int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Rounds a non-negative finite value to `digits` fraction digits, ties away
/// from zero, working on its exact decimal expansion. Returns the integer and
/// fraction digits separately.
fn round_half_away(abs: f64, digits: usize) -> (String, String) {
    // 1100 位足以精確展開任何 f64
    let exact = format!("{:.1100}", abs);
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let round_up = frac_part.as_bytes().get(digits).is_some_and(|d| *d >= b'5');

    let mut kept: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(digits))
        .collect();

    if round_up {
        let mut carry = true;
        for digit in kept.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, b'1');
        }
    }

    let split = kept.len() - digits;
    let frac = String::from_utf8_lossy(&kept[split..]).into_owned();
    let int = String::from_utf8_lossy(&kept[..split]).into_owned();
    (int, frac)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// One decimal place; non-finite values are spelled out.
pub fn format_roi_percent(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() && value > 0.0 {
        "Infinity".to_string()
    } else if value.is_infinite() {
        "-Infinity".to_string()
    } else {
        let (int_part, frac_part) = round_half_away(value.abs(), 1);
        let sign = if value < 0.0 { "-" } else { "" };
        format!("{}{}.{}", sign, int_part, frac_part)
    }
}

pub fn render_projection(projection: &RoiProjection) -> String {
    format!(
        "Projected Gross Revenue: ${}\nROI: {}%\n{}",
        format_gross_revenue(projection.gross_revenue),
        format_roi_percent(projection.roi_percent),
        CLOSING_NOTE
    )
}

pub fn render_breakdown(projection: &RoiProjection) -> String {
    let b = &projection.breakdown;
    [
        ("Books (50% margin)", b.books),
        ("Clients", b.clients),
        ("Authority premium", b.authority_premium),
        ("Speaking", b.speaking),
        ("Email list", b.email),
    ]
    .iter()
    .map(|(label, amount)| format!("  {:<20} ${}", label, format_gross_revenue(*amount)))
    .collect::<Vec<_>>()
    .join("\n")
}

/// Lists the inputs the user can currently see. Hidden advanced fields still
/// take part in every calculation.
pub fn render_inputs(inputs: &InputRecord, show_advanced: bool) -> String {
    let mut lines: Vec<String> = InputField::ALL
        .into_iter()
        .filter(|field| show_advanced || !field.is_advanced())
        .map(|field| {
            format!(
                "  {:<26} {:<22} {}",
                field.label(),
                field.key(),
                inputs.get(field)
            )
        })
        .collect();

    lines.push(if show_advanced {
        "  ▴ Advanced assumptions".to_string()
    } else {
        "  ▾ Advanced assumptions (type 'advanced' to show)".to_string()
    });
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::project;

    #[test]
    fn test_gross_revenue_grouping() {
        assert_eq!(format_gross_revenue(80_000.0), "80,000");
        assert_eq!(format_gross_revenue(0.0), "0");
        assert_eq!(format_gross_revenue(999.0), "999");
        assert_eq!(format_gross_revenue(1_000.0), "1,000");
        assert_eq!(format_gross_revenue(12_345_678.0), "12,345,678");
        assert_eq!(format_gross_revenue(-2_000.0), "-2,000");
    }

    #[test]
    fn test_gross_revenue_fraction_digits() {
        assert_eq!(format_gross_revenue(1_234.5), "1,234.5");
        assert_eq!(format_gross_revenue(0.1234), "0.123");
        assert_eq!(format_gross_revenue(-0.0001), "0");
    }

    #[test]
    fn test_gross_revenue_ties_round_away_from_zero() {
        assert_eq!(format_gross_revenue(1_234.0625), "1,234.063");
        assert_eq!(format_gross_revenue(-1_234.0625), "-1,234.063");
        assert_eq!(format_gross_revenue(9_999.9999), "10,000");
    }

    #[test]
    fn test_gross_revenue_non_finite() {
        assert_eq!(format_gross_revenue(f64::INFINITY), "∞");
        assert_eq!(format_gross_revenue(f64::NEG_INFINITY), "-∞");
        assert_eq!(format_gross_revenue(f64::NAN), "NaN");
    }

    #[test]
    fn test_roi_percent_formatting() {
        assert_eq!(format_roi_percent(60.0), "60.0");
        assert_eq!(format_roi_percent(-100.0), "-100.0");
        assert_eq!(format_roi_percent(12.34), "12.3");
        assert_eq!(format_roi_percent(f64::INFINITY), "Infinity");
        assert_eq!(format_roi_percent(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_roi_percent(f64::NAN), "NaN");
    }

    #[test]
    fn test_roi_percent_ties_round_away_from_zero() {
        assert_eq!(format_roi_percent(12.25), "12.3");
        assert_eq!(format_roi_percent(-0.25), "-0.3");
        assert_eq!(format_roi_percent(0.05), "0.1");
        assert_eq!(format_roi_percent(9.96), "10.0");
        assert_eq!(format_roi_percent(-0.04), "-0.0");
    }

    #[test]
    fn test_realistic_tie_in_rendered_projection() {
        let input = InputField::ALL
            .into_iter()
            .fold(InputRecord::default(), |record, field| record.with(field, 0.0))
            .with(InputField::SpeakingGigs, 1.0)
            .with(InputField::SpeakingFee, 44_900.0)
            .with(InputField::PackageCost, 40_000.0);
        let projection = project(&input);

        assert_eq!(projection.roi_percent, 12.25);
        assert!(render_projection(&projection).contains("ROI: 12.3%"));
    }

    #[test]
    fn test_render_projection() {
        let projection = project(&InputRecord::default());
        assert_eq!(
            render_projection(&projection),
            "Projected Gross Revenue: $80,000\nROI: 60.0%\nFinally finishing your book: priceless"
        );
    }

    #[test]
    fn test_render_inputs_hides_advanced_fields() {
        let inputs = InputRecord::default();

        let collapsed = render_inputs(&inputs, false);
        assert!(collapsed.contains("copies_sold"));
        assert!(collapsed.contains("package_cost"));
        assert!(!collapsed.contains("deal_size_lift_pct"));

        let expanded = render_inputs(&inputs, true);
        assert!(expanded.contains("deal_size_lift_pct"));
        assert!(expanded.contains("email_subscribers"));
    }

    #[test]
    fn test_render_breakdown_lists_channels() {
        let rendered = render_breakdown(&project(&InputRecord::default()));
        assert!(rendered.contains("Authority premium"));
        assert!(rendered.contains("$15,000"));
    }
}
