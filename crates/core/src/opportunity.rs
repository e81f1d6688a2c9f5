//! Validation rules for opportunity submissions.

use serde_json::Value;

use crate::error::CoreError;

/// Maximum length of an opportunity name.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length of an expression-of-interest message.
pub const MAX_INTEREST_MESSAGE_LEN: usize = 2000;

pub fn validate_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("name must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate_plots(plots: i32) -> Result<(), CoreError> {
    if plots < 0 {
        return Err(CoreError::Validation("plots must not be negative".into()));
    }
    Ok(())
}

/// Longitude and latitude must be given together and lie in WGS 84 range.
pub fn validate_coordinates(longitude: Option<f64>, latitude: Option<f64>) -> Result<(), CoreError> {
    match (longitude, latitude) {
        (None, None) => Ok(()),
        (Some(lng), Some(lat)) => {
            if !(-180.0..=180.0).contains(&lng) {
                return Err(CoreError::Validation(format!(
                    "longitude {lng} is out of range [-180, 180]"
                )));
            }
            if !(-90.0..=90.0).contains(&lat) {
                return Err(CoreError::Validation(format!(
                    "latitude {lat} is out of range [-90, 90]"
                )));
            }
            Ok(())
        }
        _ => Err(CoreError::Validation(
            "longitude and latitude must be provided together".into(),
        )),
    }
}

/// The site boundary must be a GeoJSON `Polygon` geometry with at least one
/// closed linear ring.
pub fn validate_boundary(boundary: &Value) -> Result<(), CoreError> {
    let invalid = |msg: &str| Err(CoreError::Validation(format!("boundary {msg}")));

    if boundary.get("type").and_then(Value::as_str) != Some("Polygon") {
        return invalid("must be a GeoJSON Polygon");
    }
    let Some(rings) = boundary.get("coordinates").and_then(Value::as_array) else {
        return invalid("must have a coordinates array");
    };
    if rings.is_empty() {
        return invalid("must have at least one ring");
    }
    for ring in rings {
        let Some(points) = ring.as_array() else {
            return invalid("rings must be arrays of positions");
        };
        if points.len() < 4 {
            return invalid("rings must have at least four positions");
        }
        if let Some(reason) = points.iter().find_map(position_error) {
            return invalid(reason);
        }
        if points.first() != points.last() {
            return invalid("rings must be closed");
        }
    }
    Ok(())
}

/// Why a GeoJSON position is unusable, if it is. Positions are
/// `[lng, lat]` or `[lng, lat, alt]` of finite numbers in WGS 84 range.
fn position_error(position: &Value) -> Option<&'static str> {
    let Some(parts) = position.as_array() else {
        return Some("positions must be arrays");
    };
    if !(2..=3).contains(&parts.len()) {
        return Some("positions must have two or three numbers");
    }
    let mut numbers = Vec::with_capacity(parts.len());
    for part in parts {
        match part.as_f64() {
            Some(n) if n.is_finite() => numbers.push(n),
            _ => return Some("positions must contain only finite numbers"),
        }
    }
    if !(-180.0..=180.0).contains(&numbers[0]) {
        return Some("longitude is out of range [-180, 180]");
    }
    if !(-90.0..=90.0).contains(&numbers[1]) {
        return Some("latitude is out of range [-90, 90]");
    }
    None
}

pub fn validate_interest_message(message: Option<&str>) -> Result<(), CoreError> {
    match message {
        Some(m) if m.chars().count() > MAX_INTEREST_MESSAGE_LEN => Err(CoreError::Validation(
            format!("message must be at most {MAX_INTEREST_MESSAGE_LEN} characters"),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn test_name_rules() {
        assert!(validate_name("Land at Mill Lane").is_ok());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"x".repeat(MAX_NAME_LEN)).is_ok());
        assert!(validate_name(&"x".repeat(MAX_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_plots_must_be_non_negative() {
        assert!(validate_plots(0).is_ok());
        assert!(validate_plots(120).is_ok());
        assert!(validate_plots(-1).is_err());
    }

    #[test]
    fn test_coordinates() {
        assert!(validate_coordinates(None, None).is_ok());
        assert!(validate_coordinates(Some(-1.5), Some(52.3)).is_ok());
        assert!(validate_coordinates(Some(-1.5), None).is_err());
        assert!(validate_coordinates(Some(181.0), Some(0.0)).is_err());
        assert!(validate_coordinates(Some(0.0), Some(-90.5)).is_err());
    }

    #[test]
    fn test_boundary_accepts_closed_polygon() {
        let polygon = json!({
            "type": "Polygon",
            "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]
        });
        assert!(validate_boundary(&polygon).is_ok());
    }

    #[test]
    fn test_boundary_rejects_bad_shapes() {
        assert!(validate_boundary(&json!({"type": "Point", "coordinates": [0, 0]})).is_err());
        assert!(validate_boundary(&json!({"type": "Polygon", "coordinates": []})).is_err());
        let open = json!({
            "type": "Polygon",
            "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]]
        });
        assert!(validate_boundary(&open).is_err());
        let short = json!({"type": "Polygon", "coordinates": [[[0, 0], [1, 1], [0, 0]]]});
        assert!(validate_boundary(&short).is_err());
    }

    #[test]
    fn test_boundary_rejects_non_numeric_positions() {
        let strings = json!({"type": "Polygon", "coordinates": [["a", "b", "c", "a"]]});
        assert_matches!(validate_boundary(&strings), Err(CoreError::Validation(_)));

        let words = json!({
            "type": "Polygon",
            "coordinates": [[["x", "y"], ["x", "z"], ["y", "z"], ["x", "y"]]]
        });
        assert_matches!(validate_boundary(&words), Err(CoreError::Validation(_)));
    }

    #[test]
    fn test_boundary_rejects_one_dimensional_positions() {
        let flat = json!({
            "type": "Polygon",
            "coordinates": [[[1.0], [2.0], [3.0], [1.0]]]
        });
        assert_matches!(validate_boundary(&flat), Err(CoreError::Validation(_)));
    }

    #[test]
    fn test_boundary_rejects_out_of_range_positions() {
        let far = json!({
            "type": "Polygon",
            "coordinates": [[[500.0, 500.0], [501.0, 500.0], [501.0, 501.0], [500.0, 500.0]]]
        });
        assert_matches!(validate_boundary(&far), Err(CoreError::Validation(msg)) if msg.contains("longitude"));

        let polar = json!({
            "type": "Polygon",
            "coordinates": [[[0.0, 95.0], [1.0, 95.0], [1.0, 96.0], [0.0, 95.0]]]
        });
        assert_matches!(validate_boundary(&polar), Err(CoreError::Validation(msg)) if msg.contains("latitude"));
    }

    #[test]
    fn test_boundary_accepts_positions_with_altitude() {
        let with_alt = json!({
            "type": "Polygon",
            "coordinates": [[[0.0, 0.0, 10.0], [1.0, 0.0, 10.0], [1.0, 1.0, 10.0], [0.0, 0.0, 10.0]]]
        });
        assert!(validate_boundary(&with_alt).is_ok());
    }

    #[test]
    fn test_interest_message_length() {
        assert!(validate_interest_message(None).is_ok());
        assert!(validate_interest_message(Some("Interested in phase 1")).is_ok());
        let long = "a".repeat(MAX_INTEREST_MESSAGE_LEN + 1);
        assert!(validate_interest_message(Some(&long)).is_err());
    }
}
