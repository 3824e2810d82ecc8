//! View-models for the dashboard: one card per snapshot plus the history buttons.

use skycast_weather::{GeoLocation, Units, UvSeverity, WeatherReport, WeatherSnapshot};

pub const ICON_BASE_URL: &str = "http://openweathermap.org/img/wn/";
const DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Display strings for one weather snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherCard {
    /// e.g. "Saturday"
    pub day_of_week: String,
    /// e.g. "6/26/2021"
    pub date: String,
    pub icon_url: String,
    pub description: String,
    /// e.g. "High: 72°F"
    pub temperature: String,
    /// e.g. "Wind: 6 MPH WSW"
    pub wind: String,
    /// e.g. "Humidity: 13%"
    pub humidity: String,
    pub uv_index: f64,
    pub uv_severity: UvSeverity,
    pub uv_color: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardViewModel {
    /// e.g. "San Diego, California, US (6/26/2021)"
    pub location_label: String,
    pub current: WeatherCard,
    pub forecast: Vec<WeatherCard>,
}

/// One clickable history entry
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryButton {
    pub label: String,
    pub lat: f64,
    pub lon: f64,
}

pub fn render_dashboard(report: &WeatherReport) -> DashboardViewModel {
    let current = weather_card(&report.current, report.units);
    DashboardViewModel {
        location_label: format!("{} ({})", report.location.display_name(), current.date),
        forecast: report
            .forecast
            .iter()
            .map(|s| weather_card(s, report.units))
            .collect(),
        current,
    }
}

pub fn weather_card(snapshot: &WeatherSnapshot, units: Units) -> WeatherCard {
    let severity = snapshot.uv_severity();
    let direction = snapshot.wind_direction();

    let wind = if direction.is_empty() {
        format!("Wind: {} {}", snapshot.wind_speed, units.speed_suffix())
    } else {
        format!("Wind: {} {} {}", snapshot.wind_speed, units.speed_suffix(), direction)
    };

    WeatherCard {
        day_of_week: snapshot.date.format("%A").to_string(),
        date: snapshot.date.format(DATE_FORMAT).to_string(),
        icon_url: icon_url(&snapshot.icon_code),
        description: capitalize_first(&snapshot.description),
        temperature: format!("High: {}{}", snapshot.temp_max, units.temperature_suffix()),
        wind,
        humidity: format!("Humidity: {}%", snapshot.humidity),
        uv_index: snapshot.uv_index,
        uv_severity: severity,
        uv_color: severity.color(),
    }
}

/// Buttons in history order (most recent first)
pub fn history_buttons(entries: &[GeoLocation]) -> Vec<HistoryButton> {
    entries
        .iter()
        .map(|location| HistoryButton {
            label: location.display_name(),
            lat: location.lat,
            lon: location.lon,
        })
        .collect()
}

pub fn icon_url(icon_code: &str) -> String {
    format!("{ICON_BASE_URL}{icon_code}@2x.png")
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn snapshot(day: u32) -> WeatherSnapshot {
        WeatherSnapshot {
            date: NaiveDate::from_ymd_opt(2021, 6, day).unwrap(),
            icon_code: "02d".into(),
            description: "few clouds".into(),
            temp_max: 72,
            wind_speed: 6,
            wind_degrees: 250,
            humidity: 13,
            uv_index: 6.34,
        }
    }

    #[test]
    fn test_card_labels() {
        let card = weather_card(&snapshot(26), Units::Imperial);
        assert_eq!(card.day_of_week, "Saturday");
        assert_eq!(card.date, "6/26/2021");
        assert_eq!(card.icon_url, "http://openweathermap.org/img/wn/02d@2x.png");
        assert_eq!(card.description, "Few clouds");
        assert_eq!(card.temperature, "High: 72°F");
        assert_eq!(card.wind, "Wind: 6 MPH WSW");
        assert_eq!(card.humidity, "Humidity: 13%");
        assert_eq!(card.uv_severity, UvSeverity::High);
        assert_eq!(card.uv_color, "#cf7a02");
    }

    #[test]
    fn test_metric_suffixes() {
        let card = weather_card(&snapshot(26), Units::Metric);
        assert_eq!(card.temperature, "High: 72°C");
        assert_eq!(card.wind, "Wind: 6 m/s WSW");
    }

    #[test]
    fn test_dashboard_projection() {
        let report = WeatherReport {
            location: GeoLocation::new(32.7174, -117.1628, "San Diego", "US").with_state("California"),
            current: snapshot(26),
            forecast: (26..31).map(snapshot).collect(),
            units: Units::Imperial,
            fetched_at: Utc::now(),
        };

        let view = render_dashboard(&report);
        assert_eq!(view.location_label, "San Diego, California, US (6/26/2021)");
        assert_eq!(view.forecast.len(), 5);
        assert_eq!(view.forecast[4].date, "6/30/2021");
        assert_eq!(view.forecast[1].day_of_week, "Sunday");
    }

    #[test]
    fn test_history_buttons_keep_order() {
        let entries = vec![
            GeoLocation::new(30.2672, -97.7431, "Austin", "US"),
            GeoLocation::new(32.7174, -117.1628, "San Diego", "US"),
        ];
        let buttons = history_buttons(&entries);
        assert_eq!(buttons[0].label, "Austin, US");
        assert!((buttons[1].lat - 32.7174).abs() < f64::EPSILON);
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("light rain"), "Light rain");
        assert_eq!(capitalize_first(""), "");
        assert_eq!(capitalize_first("élan"), "Élan");
    }
}
