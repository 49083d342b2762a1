/// Unit label the provider mapping always produces.
pub const CELSIUS: &str = "C";

/// The last successfully fetched weather result.
///
/// Always replaced as a whole by the search handler, never merged with a
/// previous snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    /// Temperature in degrees of `unit`.
    pub temperature: f64,
    /// Free-text condition label from the provider, e.g. "Partly cloudy".
    pub description: String,
    /// Place name resolved by the provider, not necessarily the typed query.
    pub location: String,
    pub unit: String,
}

impl WeatherSnapshot {
    pub fn celsius(temperature: f64, description: String, location: String) -> Self {
        Self { temperature, description, location, unit: CELSIUS.to_string() }
    }
}
