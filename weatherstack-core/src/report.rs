//! Human-readable rendering of a [`WeatherResponse`].
//!
//! Sections always appear in the same order: request, current conditions,
//! wind, atmosphere, astronomy and additional observations, followed by a
//! fixed block of general recommendations. Units are metric.

use std::io::Write;

use crate::{error::Error, model::WeatherResponse};

pub const TITLE: &str = "=== Weather report ===";

pub const SECTIONS: [&str; 6] = [
    "1. Request:",
    "2. Current conditions:",
    "3. Wind:",
    "4. Atmosphere:",
    "5. Astronomy:",
    "6. Additional observations:",
];

pub const CONCLUSIONS_TITLE: &str = "=== Conclusions and recommendations ===";

/// Static commentary; it does not depend on the reported values.
const CONCLUSIONS: [&str; 3] = [
    "- The weather is cool, dress warmly.",
    "- The air is clean, a good time to plan a walk.",
    "- The day lasts about 12 hours, enjoy the daylight.",
];

/// Write the full report to `out`.
///
/// The description and icon lists are checked before anything is written, so
/// a [`crate::DataError`] never leaves a partial report behind.
pub fn write_report<W: Write>(out: &mut W, weather: &WeatherResponse) -> Result<(), Error> {
    let WeatherResponse { request, location, current } = weather;
    let description = current.primary_description()?;
    let icon = current.primary_icon()?;
    let astro = &current.astro;

    writeln!(out, "{TITLE}")?;
    writeln!(out)?;

    writeln!(out, "{}", SECTIONS[0])?;
    writeln!(out, "- Request type: {}", request.kind)?;
    writeln!(out, "- Query: {}", request.query)?;
    writeln!(out, "- Language: {}", request.language)?;
    writeln!(out, "- Units: {}", request.unit)?;
    writeln!(out, "- Location: {}, {}, {}", location.name, location.region, location.country)?;
    writeln!(out, "- Coordinates: latitude {}, longitude {}", location.lat, location.lon)?;
    writeln!(out, "- Time zone: {} (UTC{})", location.timezone_id, signed_offset(&location.utc_offset))?;
    writeln!(out, "- Local time: {}", location.localtime)?;
    match location.local_timestamp() {
        Some(ts) => writeln!(
            out,
            "- Epoch: {} ({})",
            location.localtime_epoch,
            ts.format("%Y-%m-%d %H:%M:%S UTC")
        )?,
        None => writeln!(out, "- Epoch: {}", location.localtime_epoch)?,
    }
    writeln!(out)?;

    writeln!(out, "{}", SECTIONS[1])?;
    writeln!(out, "- Observed at: {}", utc_suffixed(&current.observation_time))?;
    writeln!(out, "- Temperature: {}°C", current.temperature)?;
    writeln!(out, "- Feels like: {}°C", current.feelslike)?;
    writeln!(out, "- Conditions: {description} (code {})", current.weather_code)?;
    writeln!(out, "- Icon: {icon}")?;
    writeln!(out)?;

    writeln!(out, "{}", SECTIONS[2])?;
    writeln!(out, "- Speed: {} km/h", current.wind_speed)?;
    writeln!(out, "- Direction: {} ({}°)", current.wind_dir, current.wind_degree)?;
    writeln!(out)?;

    writeln!(out, "{}", SECTIONS[3])?;
    writeln!(out, "- Pressure: {} mbar", current.pressure)?;
    writeln!(out, "- Humidity: {}%", current.humidity)?;
    writeln!(out, "- Cloud cover: {}%", current.cloudcover)?;
    writeln!(out, "- Visibility: {} km", current.visibility)?;
    writeln!(out, "- Precipitation: {:.1} mm", current.precip)?;
    writeln!(out)?;

    writeln!(out, "{}", SECTIONS[4])?;
    writeln!(out, "- Sunrise: {}", astro.sunrise)?;
    writeln!(out, "- Sunset: {}", astro.sunset)?;
    writeln!(out, "- Moonrise: {}", astro.moonrise)?;
    writeln!(out, "- Moonset: {}", astro.moonset)?;
    writeln!(out, "- Moon phase: {}", astro.moon_phase)?;
    writeln!(out, "- Moon illumination: {}%", astro.moon_illumination)?;
    writeln!(out)?;

    writeln!(out, "{}", SECTIONS[5])?;
    writeln!(out, "- UV index: {}", current.uv_index)?;
    writeln!(out, "- Day or night: {}", day_or_night(&current.is_day))?;
    writeln!(out)?;

    writeln!(out, "{CONCLUSIONS_TITLE}")?;
    for line in CONCLUSIONS {
        writeln!(out, "{line}")?;
    }

    Ok(())
}

/// Render the report into a string.
pub fn render_report(weather: &WeatherResponse) -> Result<String, Error> {
    let mut buf = Vec::new();
    write_report(&mut buf, weather)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

// The API sends "4.0" or "-5.0"; show "+4.0" for symmetry.
fn signed_offset(offset: &str) -> String {
    if offset.is_empty() || offset.starts_with(['-', '+']) {
        offset.to_string()
    } else {
        format!("+{offset}")
    }
}

fn utc_suffixed(time: &str) -> String {
    if time.is_empty() { String::new() } else { format!("{time} UTC") }
}

fn day_or_night(is_day: &str) -> &str {
    match is_day {
        "yes" => "day",
        "no" => "night",
        other => other,
    }
}
