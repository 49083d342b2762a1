//! Declarative rendering of [`WidgetState`] into a card the terminal can print.

use std::fmt;

use crate::{
    clock::Clock,
    format::{condition_message, location_message, temperature_message},
    widget::WidgetState,
};

pub const TITLE: &str = "Weather widget";
pub const DESCRIPTION: &str = "Search for the current weather conditions in your city.";
pub const PLACEHOLDER: &str = "Enter a city name.";
pub const SEARCH_LABEL: &str = "Search";
pub const LOADING_LABEL: &str = "Loading...";

pub const THERMOMETER_ICON: &str = "🌡";
pub const CLOUD_ICON: &str = "☁";
pub const MAP_PIN_ICON: &str = "📍";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonView {
    pub label: &'static str,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherLine {
    pub icon: &'static str,
    pub text: String,
}

/// Everything the card shows for one state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetView {
    pub title: &'static str,
    pub description: &'static str,
    pub input: String,
    pub placeholder: &'static str,
    pub button: ButtonView,
    pub error: Option<String>,
    /// Temperature, condition and location, in that order.
    pub weather: Option<[WeatherLine; 3]>,
}

pub fn render(state: &WidgetState, clock: &dyn Clock) -> WidgetView {
    let button = if state.is_loading() {
        ButtonView { label: LOADING_LABEL, disabled: true }
    } else {
        ButtonView { label: SEARCH_LABEL, disabled: false }
    };

    let weather = state.weather().map(|w| {
        [
            WeatherLine {
                icon: THERMOMETER_ICON,
                text: temperature_message(w.temperature, &w.unit),
            },
            WeatherLine { icon: CLOUD_ICON, text: condition_message(&w.description) },
            WeatherLine { icon: MAP_PIN_ICON, text: location_message(&w.location, clock) },
        ]
    });

    WidgetView {
        title: TITLE,
        description: DESCRIPTION,
        input: state.input().to_string(),
        placeholder: PLACEHOLDER,
        button,
        error: state.error().map(|e| e.to_string()),
        weather,
    }
}

impl fmt::Display for WidgetView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", self.description)?;
        writeln!(f)?;

        let field = if self.input.is_empty() { self.placeholder } else { self.input.as_str() };
        let button = if self.button.disabled {
            format!("({})", self.button.label)
        } else {
            format!("[{}]", self.button.label)
        };
        writeln!(f, "> {field}  {button}")?;

        if let Some(error) = &self.error {
            writeln!(f)?;
            writeln!(f, "{error}")?;
        }

        if let Some(lines) = &self.weather {
            writeln!(f)?;
            for line in lines {
                writeln!(f, "{} {}", line.icon, line.text)?;
            }
        }

        Ok(())
    }
}
