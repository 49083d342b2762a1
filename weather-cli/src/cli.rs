use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use weather_core::{
    Config, SystemClock, WeatherProvider, WidgetState, config::API_KEY_ENV,
    provider::weatherapi::DEFAULT_ENDPOINT, provider_from_config, render, view::PLACEHOLDER,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-widget", version, about = "Current weather for a city, with commentary")]
pub struct Cli {
    /// Log request/response details to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Defaults to `interactive`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the WeatherAPI.com API key (and optionally a custom endpoint).
    Configure,

    /// Search once and print the widget.
    Show {
        /// City name; several words are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        city: Vec<String>,
    },

    /// Keep prompting for cities until Esc or Ctrl-C.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Interactive) {
            Command::Configure => configure(),
            Command::Show { city } => {
                let mut state = WidgetState::new();
                state.set_input(city.join(" "));
                submit(&mut state).await;
                Ok(())
            }
            Command::Interactive => interactive().await,
        }
    }
}

/// Install a stderr subscriber so logs stay out of the printed card.
pub fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("WeatherAPI.com API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Leave empty to remove the stored key")
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(&api_key);

    let current_endpoint = config.endpoint.clone().unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
    let endpoint = Text::new("API endpoint:")
        .with_default(&current_endpoint)
        .prompt()
        .context("Failed to read endpoint")?;
    if endpoint.trim() == DEFAULT_ENDPOINT {
        config.set_endpoint("");
    } else {
        config.set_endpoint(&endpoint);
    }

    let path = config.save()?;
    info!(path = %path.display(), "configuration saved");
    println!("Configuration saved to {}", path.display());

    Ok(())
}

async fn interactive() -> anyhow::Result<()> {
    let mut state = WidgetState::new();
    println!("{}", render(&state, &SystemClock));

    loop {
        let input = match Text::new("City:")
            .with_placeholder(PLACEHOLDER)
            .with_initial_value(state.input())
            .prompt()
        {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read city"),
        };

        state.set_input(input);
        submit(&mut state).await;
    }

    Ok(())
}

/// Run one search against a provider built from the current config, printing
/// the loading card while the request is in flight and the result after.
async fn submit(state: &mut WidgetState) {
    submit_with(state, Config::load).await;
}

/// A config that cannot be loaded fails the search like any other lookup
/// error, so the widget leaves the loading state and the user can retry.
async fn submit_with(
    state: &mut WidgetState,
    load_config: impl FnOnce() -> anyhow::Result<Config>,
) {
    let Some(pending) = state.begin_search() else {
        println!("{}", render(state, &SystemClock));
        return;
    };

    println!("{}", render(state, &SystemClock));

    let outcome = match load_config().map(|config| current_provider(&config)) {
        Ok(provider) => provider.current(pending.location()).await,
        Err(err) => {
            warn!(error = ?err, "could not load configuration");
            Err(err)
        }
    };
    state.complete_search(pending, outcome);
    println!("{}", render(state, &SystemClock));
}

/// The credential is read again on every search so a key added with
/// `configure` in another terminal is picked up without a restart.
fn current_provider(config: &Config) -> Box<dyn WeatherProvider> {
    if config.api_key().is_none() {
        warn!(
            "No API key configured; the provider will reject the request. \
             Hint: run `weather-widget configure` or set {API_KEY_ENV}."
        );
    }

    provider_from_config(config)
}
