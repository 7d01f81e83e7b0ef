use super::{chart, ui};
use crate::core::series::round_half_up;
use crate::core::weather::WeatherReport;

const CHART_WIDTH: usize = 42;
const CHART_HEIGHT: usize = 8;

impl WeatherReport {
    pub fn display(&self) -> String {
        let place = match &self.country {
            Some(country) => format!("{}, {}", self.location, country),
            None => self.location.clone(),
        };
        let mut output = format!(
            "{}\n\n",
            ui::style_text(&format!("Weather in {place}"), ui::StyleType::Title)
        );

        output.push_str(&format!(
            "{}  {}  {}\n",
            self.condition.icon(),
            ui::style_text(
                &format!("{}°C", round_half_up(self.temperature)),
                ui::StyleType::Value
            ),
            self.description.as_deref().unwrap_or_default()
        ));
        output.push_str(&format!(
            "   Feels like: {}°C\n\n",
            round_half_up(self.feels_like)
        ));

        let mut table = ui::new_styled_table();
        let wind = self
            .wind_speed
            .map_or("N/A".to_string(), |w| format!("{w} m/s"));
        let visibility = self
            .visibility
            .map_or("N/A".to_string(), |v| format!("{} km", v / 1000.0));
        let [humidity_label, humidity] = ui::label_cells("Humidity", format!("{}%", self.humidity));
        let [wind_label, wind] = ui::label_cells("Wind", wind);
        table.add_row(vec![humidity_label, humidity, wind_label, wind]);
        let [pressure_label, pressure] =
            ui::label_cells("Pressure", format!("{} hPa", self.pressure));
        let [visibility_label, visibility] = ui::label_cells("Visibility", visibility);
        table.add_row(vec![pressure_label, pressure, visibility_label, visibility]);
        output.push_str(&table.to_string());

        if !self.forecast.is_empty() {
            let labels: Vec<String> = self
                .forecast
                .iter()
                .map(|day| day.date.format("%a %d").to_string())
                .collect();
            let temps: Vec<f64> = self.forecast.iter().map(|day| day.mean_temperature).collect();
            output.push_str(&format!(
                "\n\n{}\n",
                ui::style_text("7-Day Temperature Forecast", ui::StyleType::Subtle)
            ));
            output.push_str(&chart::render_line_chart(
                &labels,
                &temps,
                CHART_WIDTH,
                CHART_HEIGHT,
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use crate::core::series::DailyAggregate;
    use crate::core::weather::{WeatherCondition, WeatherReport};
    use chrono::NaiveDate;

    fn report() -> WeatherReport {
        WeatherReport {
            location: "London".to_string(),
            country: Some("GB".to_string()),
            temperature: 14.5,
            feels_like: 13.2,
            humidity: 72.0,
            pressure: 1012.0,
            wind_speed: Some(4.63),
            visibility: Some(9500.0),
            condition: WeatherCondition::Clouds,
            description: Some("broken clouds".to_string()),
            forecast: (1..=3)
                .map(|d| DailyAggregate {
                    date: NaiveDate::from_ymd_opt(2024, 1, d).unwrap(),
                    mean_temperature: 10.0 + d as f64,
                })
                .collect(),
        }
    }

    #[test]
    fn test_display_contains_conditions() {
        let output = report().display();
        assert!(output.contains("Weather in London, GB"));
        assert!(output.contains("15°C"));
        assert!(output.contains("Feels like: 13°C"));
        assert!(output.contains("broken clouds"));
        assert!(output.contains("72%"));
        assert!(output.contains("1012 hPa"));
        assert!(output.contains("4.63 m/s"));
        assert!(output.contains("9.5 km"));
        assert!(output.contains("7-Day Temperature Forecast"));
        assert!(output.contains("Mon 01"));
    }

    #[test]
    fn test_display_without_forecast() {
        let mut report = report();
        report.forecast.clear();
        report.wind_speed = None;
        let output = report.display();
        assert!(!output.contains("7-Day Temperature Forecast"));
        assert!(output.contains("N/A"));
    }
}
