// Renderer module - formatting utilities
// Most rendering logic is in layout.rs; number formatting shared with the
// headless report lives here.

use crate::pipeline::UserSummary;

/// Labelled user totals shown by the metric tiles and the headless report
///
/// Total is `casual + registered`, not the `cnt` column sum.
pub fn user_totals(summary: &UserSummary) -> [(&'static str, u64); 3] {
    [
        ("Casual Users", summary.casual),
        ("Registered Users", summary.registered),
        ("Total Users", summary.riders()),
    ]
}

/// Integer with `.` as thousands separator, e.g. `1.234.567`
pub fn format_number(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Count with `.` thousands separator
pub fn format_count(value: u64) -> String {
    format_number(value as f64)
}

/// Compact axis label: `1.5 B`, `2.3 M`, `4.0 K`, or the plain value
pub fn format_large_number(value: f64) -> String {
    if value >= 1e9 {
        format!("{:.1} B", value * 1e-9)
    } else if value >= 1e6 {
        format!("{:.1} M", value * 1e-6)
    } else if value >= 1e3 {
        format!("{:.1} K", value * 1e-3)
    } else {
        format!("{}", value)
    }
}

/// Fraction as a percentage with one decimal, e.g. `0.183` → `18.3%`
pub fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// Two-digit hour label, e.g. `08:00`
pub fn format_hour(hour: u8) -> String {
    format!("{:02}:00", hour)
}
