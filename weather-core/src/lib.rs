//! Core library for the weather widget.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The WeatherAPI.com provider behind the [`WeatherProvider`] trait
//! - Message formatters and the injectable [`Clock`]
//! - Widget state, the search handler and the renderer
//!
//! It is used by `weather-widget-cli`, but any front-end that can forward
//! keystrokes and submit events can drive it.

pub mod clock;
pub mod config;
pub mod format;
pub mod model;
pub mod provider;
pub mod view;
pub mod widget;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use model::WeatherSnapshot;
pub use provider::{WeatherProvider, provider_from_config, weatherapi::WeatherApiProvider};
pub use view::{WidgetView, render};
pub use widget::{PendingSearch, SearchError, WidgetState};
