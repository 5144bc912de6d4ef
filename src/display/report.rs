//! Report formatting utilities for terminal output

use crate::models::Money;

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Bar for a money amount against the largest amount in the report
pub fn money_bar(value: Money, max_value: Money, width: usize) -> String {
    format_bar(value.cents() as f64, max_value.cents() as f64, width)
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate a string to a maximum length with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

/// A labelled amount line, as used in summary panels
pub fn amount_line(label: &str, amount: Money, width: usize) -> String {
    let amount = amount.to_string();
    let gap = width.saturating_sub(label.chars().count() + amount.len()).max(1);
    format!("{}{}{}\n", label, " ".repeat(gap), amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.05), "0.05%");
        assert_eq!(format_percentage(5.5), "5.5%");
        assert_eq!(format_percentage(50.0), "50%");
    }

    #[test]
    fn test_format_bar() {
        let bar = format_bar(50.0, 100.0, 10);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 5);
        assert_eq!(format_bar(-5.0, 100.0, 4), "    ");
        assert_eq!(
            money_bar(Money::from_dollars(300), Money::from_dollars(300), 6),
            "██████"
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 5), "He...");
        assert_eq!(truncate("Hi", 5), "Hi");
        assert_eq!(truncate("Café Olé", 6), "Caf...");
    }

    #[test]
    fn test_amount_line() {
        assert_eq!(
            amount_line("Income:", Money::from_dollars(20), 20),
            "Income:       $20.00\n"
        );
    }
}
