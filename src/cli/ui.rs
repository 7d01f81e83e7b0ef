use crate::core::change::ChangeSummary;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Value,
    Gain,
    Loss,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Value => style(text).bold(),
        StyleType::Gain => style(text).green(),
        StyleType::Loss => style(text).red(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// A bold label cell followed by its value.
pub fn label_cells(label: &str, value: String) -> [Cell; 2] {
    [
        Cell::new(label).add_attribute(Attribute::Bold),
        Cell::new(value),
    ]
}

/// Formats with two decimals and an explicit sign for non-negative values.
pub fn signed(value: f64) -> String {
    if value >= 0.0 {
        format!("+{value:.2}")
    } else {
        format!("{value:.2}")
    }
}

/// "+1.09 (+0.69%)", or "N/A" for parts that cannot be displayed.
pub fn change_text(change: &ChangeSummary) -> String {
    let delta = change.absolute_delta.map_or("N/A".to_string(), signed);
    let percent = change
        .percent_delta
        .map_or("N/A".to_string(), |p| format!("{}%", signed(p)));
    format!("{delta} ({percent})")
}

/// Colors a change by its direction.
pub fn styled_change(change: &ChangeSummary) -> String {
    let text = change_text(change);
    if change.absolute_delta.is_none() {
        return style_text(&text, StyleType::Subtle);
    }
    let style_type = if change.is_gain() {
        StyleType::Gain
    } else {
        StyleType::Loss
    };
    style_text(&text, style_type)
}

/// Creates a spinner shown while panels load.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} [{elapsed_precise}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Prints a separator line matching the terminal width.
pub fn print_separator() {
    let term_width = console::Term::stdout()
        .size_checked()
        .map(|(_, w)| w as usize)
        .unwrap_or(80);
    println!("\n{}", "─".repeat(term_width));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed() {
        assert_eq!(signed(1.234), "+1.23");
        assert_eq!(signed(0.0), "+0.00");
        assert_eq!(signed(-2.5), "-2.50");
    }

    #[test]
    fn test_change_text() {
        let change = ChangeSummary::from_series(&[158.07, 159.16]);
        assert_eq!(change_text(&change), "+1.09 (+0.69%)");

        let change = ChangeSummary::from_series(&[110.0, 100.0]);
        assert_eq!(change_text(&change), "-10.00 (-9.09%)");

        assert_eq!(change_text(&ChangeSummary::from_series(&[1.0])), "N/A (N/A)");
        assert_eq!(
            change_text(&ChangeSummary::from_series(&[0.0, 3.0])),
            "+3.00 (N/A)"
        );
    }
}
