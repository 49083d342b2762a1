//! Human-readable messages built from a [`WeatherSnapshot`](crate::WeatherSnapshot)'s fields.

use std::fmt;

use crate::{clock::Clock, model::CELSIUS};

/// Commentary for a temperature. Only Celsius gets banded messages; any
/// other unit is echoed back as `"{value}° {unit}"`.
pub fn temperature_message(temperature: f64, unit: &str) -> String {
    let t = Degrees(temperature);

    if unit != CELSIUS {
        return format!("{t}° {unit}");
    }

    if temperature < 0.0 {
        format!("It's freezing at {t}°C. Bundle up!")
    } else if temperature < 10.0 {
        format!("It's quite cold at {t}°. Wear warm clothes.")
    } else if temperature < 20.0 {
        format!("The temperature is {t}°. Comfortable for a light jacket")
    } else if temperature < 30.0 {
        format!("It's a pleasant {t}°C. Enjoy the nice weather.")
    } else {
        format!("It's hot at {t}. Stay hydrated!")
    }
}

const CONDITIONS: &[(&str, &str)] = &[
    ("sunny", "It's a beautiful sunny day!"),
    ("partly cloudy", "Expect some clouds and sunshine."),
    ("cloudy", "It's cloudy today."),
    ("overcast", "The sky is overcast"),
    ("rain", "Don't forget your umbrella! It's raining."),
    ("thunder storm", "Thunderstorms are expected today."),
    ("snow", "Bundle up! It's snowing."),
    ("mist", "It's misty outside."),
    ("fog", "Be careful, there's fog outside."),
];

/// Commentary for a provider condition label, matched case-insensitively.
///
/// Labels outside the table are shown as the provider sent them.
pub fn condition_message(description: &str) -> String {
    let key = description.to_lowercase();

    CONDITIONS
        .iter()
        .find(|(label, _)| *label == key)
        .map(|(_, message)| (*message).to_string())
        .unwrap_or_else(|| description.to_string())
}

/// `true` from 18:00 up to (not including) 06:00.
pub fn is_night(hour: u32) -> bool {
    hour >= 18 || hour < 6
}

/// Location qualified by whether it is currently day or night on `clock`.
pub fn location_message(location: &str, clock: &dyn Clock) -> String {
    if is_night(clock.current_hour()) {
        format!("{location} at Night")
    } else {
        format!("{location} During the day")
    }
}

/// Displays a temperature the way the provider's JSON number reads:
/// `15` rather than `15.0`, and never `-0`.
struct Degrees(f64);

impl fmt::Display for Degrees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0.0 { f.write_str("0") } else { write!(f, "{}", self.0) }
    }
}
