//! Headless driver over [`vv_app::App`].
//!
//! This is the one place errors stop propagating: a failed command prints the
//! error's user-facing message and exits non-zero.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{error, info};
use vv_app::AppError;
use vv_core::api::{ApiError, ChatRequest, Credentials};
use vv_core::location::Coordinate;
use vv_core::places::TopRecommendationsQuery;
use vv_infra::http::{parse_calendar_oauth_callback, CalendarOAuthOutcome};

use crate::bootstrap::{default_config_path, load_config_or_default, wire_dependencies, WiredApp};

#[derive(Debug, Parser)]
#[command(name = "violetvibes")]
#[command(about = "VioletVibes campus assistant client", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file path (defaults to the platform config dir)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Also write logs to a daily-rolling file in this directory
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, Args)]
pub struct LocationArgs {
    /// Latitude of the current position
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude of the current position
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,
}

impl LocationArgs {
    pub fn coordinate(&self) -> Option<Coordinate> {
        Some(Coordinate::new(self.lat?, self.lon?))
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show onboarding progress and session state
    Status,

    /// Create an account
    Signup {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
        #[arg(long)]
        first_name: Option<String>,
    },

    /// Log in with email and password
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },

    /// Clear every piece of local user state
    Logout,

    /// Mark the welcome screen as seen
    WelcomeSeen,

    /// Request every permission and complete the permissions step
    Permissions,

    /// Mark the onboarding survey as completed
    SurveyDone,

    /// Send a chat message
    Chat {
        message: String,
        #[command(flatten)]
        location: LocationArgs,
        /// Start a new conversation first
        #[arg(long)]
        clear: bool,
    },

    /// Top recommendations
    Recs {
        #[arg(short, long, default_value = "10")]
        limit: u32,
        #[arg(long)]
        vibe: Option<String>,
        #[arg(long)]
        weather: Option<String>,
        #[command(flatten)]
        location: LocationArgs,
    },

    /// Quick recommendations for one category
    Quick {
        category: String,
        #[arg(short, long, default_value = "10")]
        limit: u32,
    },

    /// Current weather
    Weather {
        #[command(flatten)]
        location: LocationArgs,
    },

    /// Home dashboard
    Dashboard {
        #[command(flatten)]
        location: LocationArgs,
    },

    /// Pull preferences from the server into the local cache
    PrefsPull,

    /// Print the URL that starts Google Calendar linking
    CalendarLink,

    /// Finish Google Calendar linking from the redirect URL
    CalendarCallback { url: String },

    /// Check for calendar free-time notifications once
    CalendarCheck,
}

/// Message to show the user for a failed command. Backend messages are
/// passed through verbatim.
pub fn user_message(err: &anyhow::Error) -> String {
    if let Some(app) = err.downcast_ref::<AppError>() {
        return app.user_message();
    }
    if let Some(api) = err.downcast_ref::<ApiError>() {
        return api.user_message();
    }
    format!("{err:#}")
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.clone().or_else(default_config_path);
    let config = load_config_or_default(config_path.as_deref())?;
    let wired = wire_dependencies(config)?;

    let result = execute(cli.command, &wired).await;
    if let Err(err) = &result {
        error!(error = %format!("{err:#}"), "command failed");
    }
    result
}

async fn execute(command: Command, wired: &WiredApp) -> anyhow::Result<()> {
    let app = &wired.app;
    let session = app.session();

    match command {
        Command::Status => {
            let view = session.view();
            println!("next step:        {:?}", view.onboarding.next_step());
            println!("welcome seen:     {}", view.onboarding.has_seen_welcome);
            println!("permissions done: {}", view.onboarding.has_completed_permissions);
            println!("logged in:        {}", view.onboarding.has_logged_in);
            println!("survey done:      {}", view.onboarding.has_completed_onboarding_survey);
            println!("authenticated:    {}", view.session.is_authenticated());
            println!("calendar linked:  {}", view.session.calendar_linked);
            if let Some(account) = view.account {
                println!("account:          {} <{}>", account.first_name, account.email);
            }
        }

        Command::Signup {
            email,
            password,
            first_name,
        } => {
            let mut credentials = Credentials::new(email, password);
            if let Some(first_name) = first_name {
                credentials = credentials.with_first_name(first_name);
            }
            let result = app.signup().execute(&credentials).await?;
            session.mark_logged_in().map_err(AppError::from)?;
            println!("signed up as {}", result.user.email);
        }

        Command::Login { email, password } => {
            let result = app
                .login()
                .execute(&Credentials::new(email, password))
                .await?;
            session.mark_logged_in().map_err(AppError::from)?;
            println!("logged in as {}", result.user.email);
        }

        Command::Logout => {
            app.logout().execute().await?;
            println!("logged out");
        }

        Command::WelcomeSeen => session.mark_welcome_seen().map_err(AppError::from)?,

        Command::Permissions => {
            for outcome in app.onboarding_permissions().request_all().await? {
                println!(
                    "{:<14} {}",
                    outcome.kind.as_str(),
                    if outcome.granted { "granted" } else { "denied" }
                );
            }
        }

        Command::SurveyDone => session.mark_survey_completed().map_err(AppError::from)?,

        Command::Chat {
            message,
            location,
            clear,
        } => {
            let token = session.token();
            if clear {
                app.deps()
                    .chat
                    .clear_chat_session(token.as_deref())
                    .await?;
            }
            let mut request = ChatRequest::new(message);
            if let Some(at) = location.coordinate() {
                request = request.at(at.latitude, at.longitude);
            }
            let response = app.deps().chat.send_chat(&request, token.as_deref()).await?;
            println!("{}", response.reply_text());
            for place in response.places.iter().flatten() {
                println!("  - {}", place.title);
            }
        }

        Command::Recs {
            limit,
            vibe,
            weather,
            location,
        } => {
            let mut query = TopRecommendationsQuery::new(limit);
            if let Some(at) = location.coordinate() {
                query = query.near(at.latitude, at.longitude);
            }
            if let Some(vibe) = vibe {
                query = query.with_vibe(vibe);
            }
            if let Some(weather) = weather {
                query = query.with_weather(weather);
            }
            let places = app
                .deps()
                .recommendations
                .top_recommendations(&query, session.token().as_deref())
                .await?;
            print_json(&places)?;
        }

        Command::Quick { category, limit } => {
            let response = app
                .deps()
                .recommendations
                .quick_recommendations(&category, limit, session.token().as_deref())
                .await?;
            print_json(&response)?;
        }

        Command::Weather { location } => {
            let weather = match location.coordinate() {
                Some(at) => app.weather_refresher().on_location(at).await?,
                None => Some(app.deps().weather.current_weather(None).await?),
            };
            if let Some(weather) = weather {
                println!("{} {}°F", weather.emoji, weather.temp_f);
            }
        }

        Command::Dashboard { location } => {
            let token = session.require_token()?;
            let dashboard = app
                .deps()
                .places
                .dashboard(&token, location.coordinate())
                .await?;
            print_json(&dashboard)?;
        }

        Command::PrefsPull => {
            let (preferences, source) = app.sync_preferences().pull().await?;
            info!(?source, "preferences loaded");
            print_json(&preferences)?;
        }

        Command::CalendarLink => {
            let token = session.require_token()?;
            println!("{}", wired.backend.calendar_oauth_start_url(&token)?);
        }

        Command::CalendarCallback { url } => {
            match parse_calendar_oauth_callback(&url)? {
                CalendarOAuthOutcome::Linked => {}
                CalendarOAuthOutcome::Failed(message) => {
                    return Err(AppError::Api(ApiError::Server(message)).into());
                }
                CalendarOAuthOutcome::AuthorizationCode { code, state } => {
                    let token = session.require_token()?;
                    wired
                        .backend
                        .complete_calendar_oauth(&token, &code, &state)
                        .await?;
                }
            }
            session.mark_calendar_linked().map_err(AppError::from)?;
            println!("calendar linked");
        }

        Command::CalendarCheck => {
            let scheduled = app.calendar_monitor().check_now().await?;
            println!("{scheduled} notification(s) scheduled");
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render output")?;
    println!("{rendered}");
    Ok(())
}
