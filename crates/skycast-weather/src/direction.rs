//! Wind bearing to compass label.

/// Width of one compass sector in degrees
const SECTOR_DEGREES: f64 = 22.5;

/// Labels indexed by sector; index 16 wraps back to north.
const COMPASS_LABELS: [&str; 17] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW", "N",
];

/// Map a wind bearing in degrees to one of the 16 compass labels.
///
/// The bearing is divided into 22.5° sectors and rounded to the nearest
/// sector, halves rounding up. Sectors outside `0..=16` (and NaN) produce an
/// empty label.
pub fn resolve_direction(degrees: f64) -> &'static str {
    let partition = (degrees / SECTOR_DEGREES + 0.5).floor();
    if !(0.0..=16.0).contains(&partition) {
        return "";
    }
    COMPASS_LABELS[partition as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinal_points() {
        assert_eq!(resolve_direction(0.0), "N");
        assert_eq!(resolve_direction(90.0), "E");
        assert_eq!(resolve_direction(180.0), "S");
        assert_eq!(resolve_direction(270.0), "W");
    }

    #[test]
    fn test_north_wraps_around() {
        assert_eq!(resolve_direction(360.0), "N");
        assert_eq!(resolve_direction(350.0), "N");
        assert_eq!(resolve_direction(348.0), "NNW");
    }

    #[test]
    fn test_intercardinal_points() {
        assert_eq!(resolve_direction(45.0), "NE");
        assert_eq!(resolve_direction(135.0), "SE");
        assert_eq!(resolve_direction(225.0), "SW");
        assert_eq!(resolve_direction(250.0), "WSW");
        assert_eq!(resolve_direction(315.0), "NW");
    }

    #[test]
    fn test_sector_boundary_rounds_up() {
        assert_eq!(resolve_direction(11.24), "N");
        assert_eq!(resolve_direction(11.25), "NNE");
        assert_eq!(resolve_direction(258.74), "WSW");
        assert_eq!(resolve_direction(258.75), "W");
    }

    #[test]
    fn test_out_of_range_is_empty() {
        assert_eq!(resolve_direction(371.25), "");
        assert_eq!(resolve_direction(-20.0), "");
        assert_eq!(resolve_direction(f64::NAN), "");
    }

    #[test]
    fn test_small_negative_rounds_to_north() {
        assert_eq!(resolve_direction(-5.0), "N");
    }
}
