//! Maps One Call payloads onto `WeatherSnapshot` records.

use chrono::{Days, NaiveDate, Utc};

use crate::types::{GeoLocation, RawCondition, RawWeather, Units, WeatherError, WeatherReport, WeatherSnapshot};

/// Number of daily records kept for the forecast strip
pub const FORECAST_DAYS: usize = 5;

/// Normalize the `current` block, dated `today`.
pub fn normalize_current(raw: &RawWeather, today: NaiveDate) -> Result<WeatherSnapshot, WeatherError> {
    let current = raw
        .current
        .as_ref()
        .ok_or_else(|| WeatherError::MalformedResponse("missing `current` block".to_string()))?;
    let condition = primary_condition(&current.weather, "current")?;

    Ok(WeatherSnapshot {
        date: today,
        icon_code: condition.icon.clone(),
        description: condition.description.clone(),
        temp_max: round_half_up(current.temp),
        wind_speed: round_half_up(current.wind_speed),
        wind_degrees: current.wind_deg,
        humidity: current.humidity,
        uv_index: current.uvi,
    })
}

/// Normalize up to [`FORECAST_DAYS`] daily records; entry `i` is dated
/// `today + i` days. Fewer records in the payload yield a shorter forecast.
pub fn normalize_forecast(
    raw: &RawWeather,
    today: NaiveDate,
) -> Result<Vec<WeatherSnapshot>, WeatherError> {
    let daily = raw
        .daily
        .as_ref()
        .ok_or_else(|| WeatherError::MalformedResponse("missing `daily` block".to_string()))?;

    daily
        .iter()
        .take(FORECAST_DAYS)
        .enumerate()
        .map(|(offset, day)| {
            let date = today
                .checked_add_days(Days::new(offset as u64))
                .ok_or_else(|| WeatherError::MalformedResponse("forecast date out of range".to_string()))?;
            let condition = primary_condition(&day.weather, "daily")?;

            Ok(WeatherSnapshot {
                date,
                icon_code: condition.icon.clone(),
                description: condition.description.clone(),
                temp_max: round_half_up(day.temp.day),
                wind_speed: round_half_up(day.wind_speed),
                wind_degrees: day.wind_deg,
                humidity: day.humidity,
                uv_index: day.uvi,
            })
        })
        .collect()
}

/// Normalize a full payload into a report for `location`.
pub fn normalize_report(
    location: GeoLocation,
    raw: &RawWeather,
    units: Units,
    today: NaiveDate,
) -> Result<WeatherReport, WeatherError> {
    let current = normalize_current(raw, today)?;
    let forecast = normalize_forecast(raw, today)?;

    tracing::debug!(
        "Normalized weather for {}: {} forecast days",
        location.display_name(),
        forecast.len()
    );

    Ok(WeatherReport {
        location,
        current,
        forecast,
        units,
        fetched_at: Utc::now(),
    })
}

fn primary_condition<'a>(
    conditions: &'a [RawCondition],
    block: &str,
) -> Result<&'a RawCondition, WeatherError> {
    conditions.first().ok_or_else(|| {
        WeatherError::MalformedResponse(format!("`{block}` record has no weather condition"))
    })
}

/// Round to the nearest integer, halves toward positive infinity.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: serde_json::Value) -> RawWeather {
        serde_json::from_value(json).unwrap()
    }

    fn condition() -> serde_json::Value {
        serde_json::json!([{ "id": 801, "main": "Clouds", "description": "few clouds", "icon": "02d" }])
    }

    fn daily(days: usize) -> Vec<serde_json::Value> {
        (0..days)
            .map(|i| {
                serde_json::json!({
                    "dt": 1_624_752_375 + i as i64 * 86_400,
                    "temp": { "day": 70.5 + i as f64, "min": 60.0, "max": 80.0 },
                    "wind_speed": 6.1,
                    "wind_deg": 260,
                    "humidity": 13,
                    "uvi": 6.34,
                    "weather": condition(),
                })
            })
            .collect()
    }

    fn payload(days: usize) -> RawWeather {
        raw(serde_json::json!({
            "timezone": "America/Los_Angeles",
            "current": {
                "dt": 1_624_752_375,
                "temp": 72.41,
                "wind_speed": 6.5,
                "wind_deg": 260,
                "humidity": 13,
                "uvi": 6.34,
                "weather": condition(),
            },
            "daily": daily(days),
        }))
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 6, 26).unwrap()
    }

    #[test]
    fn test_current_rounds_and_passes_through() {
        let snapshot = normalize_current(&payload(7), today()).unwrap();
        assert_eq!(snapshot.date, today());
        assert_eq!(snapshot.temp_max, 72);
        assert_eq!(snapshot.wind_speed, 7);
        assert_eq!(snapshot.wind_degrees, 260);
        assert_eq!(snapshot.humidity, 13);
        assert!((snapshot.uv_index - 6.34).abs() < f64::EPSILON);
        assert_eq!(snapshot.icon_code, "02d");
        assert_eq!(snapshot.description, "few clouds");
    }

    #[test]
    fn test_forecast_takes_five_consecutive_days() {
        let forecast = normalize_forecast(&payload(8), today()).unwrap();
        assert_eq!(forecast.len(), FORECAST_DAYS);
        for (i, snapshot) in forecast.iter().enumerate() {
            assert_eq!(snapshot.date, today() + chrono::Duration::days(i as i64));
        }
        // temp.day of 70.5 rounds half up
        assert_eq!(forecast[0].temp_max, 71);
        assert_eq!(forecast[4].temp_max, 75);
    }

    #[test]
    fn test_short_forecast_is_not_padded() {
        let forecast = normalize_forecast(&payload(3), today()).unwrap();
        assert_eq!(forecast.len(), 3);
    }

    #[test]
    fn test_missing_current_is_malformed() {
        let payload = raw(serde_json::json!({ "daily": daily(5) }));
        let err = normalize_current(&payload, today()).unwrap_err();
        assert!(matches!(err, WeatherError::MalformedResponse(_)));
    }

    #[test]
    fn test_missing_daily_is_malformed() {
        let mut payload = payload(5);
        payload.daily = None;
        let err = normalize_forecast(&payload, today()).unwrap_err();
        assert!(matches!(err, WeatherError::MalformedResponse(_)));
    }

    #[test]
    fn test_empty_condition_list_is_malformed() {
        let mut payload = payload(5);
        if let Some(current) = payload.current.as_mut() {
            current.weather.clear();
        }
        assert!(matches!(
            normalize_current(&payload, today()),
            Err(WeatherError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_report_bundles_location_and_units() {
        let location = GeoLocation::new(32.7, -117.2, "San Diego", "US");
        let report = normalize_report(location.clone(), &payload(7), Units::Imperial, today()).unwrap();
        assert_eq!(report.location, location);
        assert_eq!(report.units, Units::Imperial);
        assert_eq!(report.forecast.len(), 5);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(72.41), 72);
        assert_eq!(round_half_up(72.5), 73);
        assert_eq!(round_half_up(-0.5), 0);
        assert_eq!(round_half_up(-1.6), -2);
    }
}
