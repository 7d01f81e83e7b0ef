//! Line charts for terminal panels.
//!
//! Series are drawn with Ratatui's `Chart` widget into an off-screen buffer,
//! which is then flattened into plain text lines.

use ratatui::{
    buffer::{Buffer, Cell},
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    widgets::{Axis, Chart, Dataset, GraphType, Widget},
};

/// Smallest area the chart widget can lay out axes and labels in.
const MIN_WIDTH: u16 = 20;
const MIN_HEIGHT: u16 = 5;

/// Renders `values` as a line chart with min/max labels on the y-axis and the
/// first and last `labels` under the x-axis. Returns an empty string for no
/// values.
pub fn render_line_chart(labels: &[String], values: &[f64], width: usize, height: usize) -> String {
    if values.is_empty() {
        return String::new();
    }

    let area = Rect::new(
        0,
        0,
        u16::try_from(width).unwrap_or(u16::MAX).max(MIN_WIDTH),
        u16::try_from(height).unwrap_or(u16::MAX).max(MIN_HEIGHT),
    );
    let points: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .map(|(i, value)| (i as f64, *value))
        .collect();
    let (y_min, y_max) = y_bounds(values);
    let x_max = (values.len().saturating_sub(1) as f64).max(1.0);

    let x_labels: Vec<String> = match (labels.first(), labels.last()) {
        (Some(first), Some(last)) if labels.len() > 1 => vec![first.clone(), last.clone()],
        (Some(first), _) => vec![first.clone()],
        _ => Vec::new(),
    };

    let dataset = Dataset::default()
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&points);
    let chart = Chart::new(vec![dataset])
        .x_axis(Axis::default().bounds([0.0, x_max]).labels(x_labels))
        .y_axis(
            Axis::default()
                .bounds([y_min, y_max])
                .labels(vec![format!("{y_min:.1}"), format!("{y_max:.1}")]),
        );

    let mut buf = Buffer::empty(area);
    chart.render(area, &mut buf);
    buffer_to_string(&buf)
}

/// Value range of the series, widened when flat so the line sits mid-chart.
fn y_bounds(values: &[f64]) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if (max - min).abs() < f64::EPSILON {
        (min - 1.0, max + 1.0)
    } else {
        (min, max)
    }
}

fn buffer_to_string(buf: &Buffer) -> String {
    let width = usize::from(buf.area.width);
    let mut out = String::new();
    for row in buf.content().chunks(width) {
        let line: String = row.iter().map(Cell::symbol).collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn has_plot(chart: &str) -> bool {
        chart.chars().any(|c| ('\u{2801}'..='\u{28FF}').contains(&c))
    }

    #[test]
    fn test_empty_series() {
        assert_eq!(render_line_chart(&[], &[], 20, 5), "");
    }

    #[test]
    fn test_rising_series_layout() {
        let chart = render_line_chart(&labels(&["Mon", "Tue", "Wed"]), &[1.0, 2.0, 3.0], 30, 8);
        let lines: Vec<&str> = chart.lines().collect();

        assert_eq!(lines.len(), 8);
        assert!(chart.contains("3.0"));
        assert!(chart.contains("1.0"));
        assert!(chart.contains("Mon"));
        assert!(chart.contains("Wed"));
        assert!(!chart.contains("Tue"));
        assert!(has_plot(&chart));
    }

    #[test]
    fn test_flat_series_is_padded() {
        let chart = render_line_chart(&labels(&["a", "b"]), &[5.0, 5.0], 30, 8);
        assert!(chart.contains("4.0"));
        assert!(chart.contains("6.0"));
        assert!(has_plot(&chart));
    }

    #[test]
    fn test_small_area_is_enlarged() {
        let chart = render_line_chart(&labels(&["x", "y"]), &[1.0, 2.0], 4, 2);
        assert_eq!(chart.lines().count(), usize::from(MIN_HEIGHT));
    }

    #[test]
    fn test_single_point() {
        let chart = render_line_chart(&labels(&["only"]), &[7.0], 30, 6);
        assert_eq!(chart.lines().count(), 6);
        assert!(chart.contains("only"));
        assert!(chart.contains("8.0"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let values = [12.0, 15.0, 11.0, 9.0, 14.0, 16.0, 13.0];
        let names = labels(&["d1", "d2", "d3", "d4", "d5", "d6", "d7"]);
        assert_eq!(
            render_line_chart(&names, &values, 40, 8),
            render_line_chart(&names, &values, 40, 8)
        );
    }
}
