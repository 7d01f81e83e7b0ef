use super::{chart, ui};
use crate::core::finance::StockReport;

const CHART_WIDTH: usize = 60;
const CHART_HEIGHT: usize = 10;

impl StockReport {
    pub fn display(&self) -> String {
        let mut output = format!(
            "{}\n\n",
            ui::style_text(&format!("{} Stock Data", self.symbol), ui::StyleType::Title)
        );

        let price = self
            .current_price()
            .map_or("N/A".to_string(), |p| format!("${p:.2}"));
        output.push_str(&format!(
            "{}  {}\n",
            ui::style_text(&price, ui::StyleType::Value),
            ui::styled_change(&self.change)
        ));

        let previous = self
            .previous_close()
            .map_or("N/A".to_string(), |p| format!("${p:.2}"));
        let updated = self.last_refreshed.as_deref().unwrap_or("N/A");
        output.push_str(&ui::style_text(
            &format!("Previous Close: {previous} | Last Updated: {updated}"),
            ui::StyleType::Subtle,
        ));
        output.push_str("\n\n");

        let labels: Vec<String> = self.prices.iter().map(|p| p.date.clone()).collect();
        let closes: Vec<f64> = self.prices.iter().map(|p| p.close).collect();
        output.push_str(&chart::render_line_chart(
            &labels,
            &closes,
            CHART_WIDTH,
            CHART_HEIGHT,
        ));

        output
    }
}
