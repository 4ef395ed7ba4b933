//! Turns raw `current` payloads into [`WeatherResponse`] values.
//!
//! Missing members and explicit `null`s both decode to the zero value of the
//! field; unknown members are ignored.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::{error::DecodeError, model::WeatherResponse};

/// Error body weatherstack sends (usually with HTTP 200) for bad keys or queries.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiErrorBody {
    code: i64,
    #[serde(rename = "type")]
    kind: String,
    info: String,
}

pub fn decode(bytes: &[u8]) -> Result<WeatherResponse, DecodeError> {
    let mut value: Value = serde_json::from_slice(bytes)?;

    if !value.is_object() {
        return Err(DecodeError::UnexpectedShape { found: kind_of(&value) });
    }
    strip_nulls(&mut value);

    if value.get("success").and_then(Value::as_bool) == Some(false) || value.get("error").is_some() {
        let body: ApiErrorBody = value
            .get("error")
            .cloned()
            .map(serde_json::from_value)
            .transpose()?
            .unwrap_or_default();
        return Err(DecodeError::Api { code: body.code, kind: body.kind, info: body.info });
    }

    let weather: WeatherResponse = serde_json::from_value(value)?;
    debug!(location = %weather.location.name, "Decoded weatherstack payload");

    Ok(weather)
}

fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_nulls),
        _ => {}
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Astro, Current, Location, Request};

    fn full_payload() -> Value {
        serde_json::json!({
            "request": {
                "type": "City",
                "query": "Samara, Russia",
                "language": "en",
                "unit": "m"
            },
            "location": {
                "name": "Samara",
                "country": "Russia",
                "region": "Samara",
                "lat": "53.200",
                "lon": "50.150",
                "timezone_id": "Europe/Samara",
                "localtime": "2024-10-19 12:30",
                "localtime_epoch": 1729341000,
                "utc_offset": "4.0"
            },
            "current": {
                "observation_time": "08:30 AM",
                "temperature": 7,
                "weather_code": 116,
                "weather_icons": ["https://cdn.worldweatheronline.com/images/wsymbols01_png_64/wsymbol_0002_sunny_intervals.png"],
                "weather_descriptions": ["Partly cloudy"],
                "astro": {
                    "sunrise": "07:12 AM",
                    "sunset": "05:41 PM",
                    "moonrise": "06:02 PM",
                    "moonset": "09:15 AM",
                    "moon_phase": "Waning Gibbous",
                    "moon_illumination": 97
                },
                "wind_speed": 14,
                "wind_degree": 230,
                "wind_dir": "SW",
                "pressure": 1018,
                "precip": 0.3,
                "humidity": 76,
                "cloudcover": 50,
                "feelslike": 4,
                "uv_index": 2,
                "visibility": 10,
                "is_day": "yes"
            }
        })
    }

    #[test]
    fn decodes_full_payload() {
        let bytes = serde_json::to_vec(&full_payload()).unwrap();
        let weather = decode(&bytes).unwrap();

        assert_eq!(weather.request.kind, "City");
        assert_eq!(weather.location.lat, "53.200");
        assert_eq!(weather.location.localtime_epoch, 1729341000);
        assert_eq!(weather.current.weather_descriptions, vec!["Partly cloudy"]);
        assert_eq!(weather.current.precip, 0.3);
        assert_eq!(weather.current.astro.moon_phase, "Waning Gibbous");
        assert_eq!(weather.current.astro.moon_illumination, 97);
        assert_eq!(weather.current.is_day, "yes");
    }

    #[test]
    fn reserialized_payload_keeps_every_field() {
        let original = full_payload();
        let weather = decode(&serde_json::to_vec(&original).unwrap()).unwrap();

        assert_eq!(serde_json::to_value(&weather).unwrap(), original);
    }

    #[test]
    fn missing_fields_take_zero_values() {
        let weather = decode(br#"{"location": {"name": "Samara"}, "current": {"temperature": 3}}"#)
            .unwrap();

        assert_eq!(weather.request, Request::default());
        assert_eq!(weather.location.name, "Samara");
        assert_eq!(weather.location.country, "");
        assert_eq!(weather.location.localtime_epoch, 0);
        assert_eq!(weather.current.temperature, 3);
        assert_eq!(weather.current.precip, 0.0);
        assert!(weather.current.weather_icons.is_empty());
        assert_eq!(weather.current.astro, Astro::default());
    }

    #[test]
    fn empty_object_decodes_to_defaults() {
        let weather = decode(b"{}").unwrap();
        assert_eq!(weather, WeatherResponse::default());
    }

    #[test]
    fn nulls_are_treated_as_absent() {
        let weather = decode(
            br#"{"location": {"name": null, "localtime_epoch": null},
                 "current": {"astro": {"moonrise": null, "moon_illumination": 12}, "weather_icons": null}}"#,
        )
        .unwrap();

        assert_eq!(weather.location, Location::default());
        assert_eq!(weather.current.astro.moonrise, "");
        assert_eq!(weather.current.astro.moon_illumination, 12);
        assert_eq!(weather.current, Current { astro: weather.current.astro.clone(), ..Current::default() });
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let weather =
            decode(br#"{"current": {"temperature": 1, "air_quality": {"co": "230.3"}}, "extra": [1, 2]}"#)
                .unwrap();
        assert_eq!(weather.current.temperature, 1);
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let err = decode(b"<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));

        let err = decode(br#"{"current": {"#).unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
    }

    #[test]
    fn wrong_top_level_shape_is_a_decode_error() {
        for (input, found) in [
            (&b"[]"[..], "an array"),
            (&b"[{}, {}, {}]"[..], "an array"),
            (&br#""weather""#[..], "a string"),
            (&b"42"[..], "a number"),
            (&b"null"[..], "null"),
        ] {
            match decode(input) {
                Err(DecodeError::UnexpectedShape { found: got }) => assert_eq!(got, found),
                other => panic!("expected shape error for {input:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn wrong_field_type_is_a_decode_error() {
        let err = decode(br#"{"current": {"temperature": "warm"}}"#).unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
    }

    #[test]
    fn null_error_member_is_not_an_api_error() {
        let weather = decode(
            br#"{"error": null, "success": null,
                 "location": {"name": "Samara"},
                 "current": {"temperature": 5, "weather_descriptions": ["Mist"]}}"#,
        )
        .unwrap();

        assert_eq!(weather.location.name, "Samara");
        assert_eq!(weather.current.temperature, 5);
        assert_eq!(weather.current.primary_description(), Ok("Mist"));
    }

    #[test]
    fn api_error_payload_is_reported() {
        let err = decode(
            br#"{"success": false, "error": {"code": 101, "type": "invalid_access_key",
                 "info": "You have not supplied a valid API Access Key."}}"#,
        )
        .unwrap_err();

        match err {
            DecodeError::Api { code, kind, info } => {
                assert_eq!(code, 101);
                assert_eq!(kind, "invalid_access_key");
                assert!(info.contains("valid API Access Key"));
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }
}
