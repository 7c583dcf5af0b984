//! Command dispatch for the `quizgate` binary.
//!
//! Builds the application state from the configuration and drives the session
//! manager for one command. Results are printed as JSON on stdout.

use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::cli::Command;
use crate::config::{schema_json, ConfigV1, LoggingConfig};
use crate::models::{Credentials, SignUpDetails, TokenPair};
use crate::session::{ConsoleNotifier, Notifier, TracingNotifier};
use crate::state::AppState;
use crate::ui::{Guarded, TestMenu};
use crate::utils::logger::{parse_format, LogFormat};

type CommandResult = Result<(), Box<dyn Error>>;

/// Runs a single command against the configured backend.
///
/// # Errors
///
/// Returns an error when the state cannot be built, when an operation yields no
/// result (the reason has already been reported), or when output cannot be written.
pub async fn run(config: Arc<ConfigV1>, command: Command) -> CommandResult {
    match command {
        Command::Schema => {
            println!("{}", schema_json()?);
            return Ok(());
        }
        Command::Menu => {
            for link in TestMenu.links() {
                println!("{:<24} {}", link.title, link.route);
            }
            return Ok(());
        }
        _ => {}
    }

    let notifier = notifier_for(&config.logging);
    let state = AppState::build(config, notifier)?;
    info!("Running {} against {}", command_name(&command), state.config.api.base_url);
    dispatch(&state, command).await
}

/// With JSON logs the output is meant for machines, so warnings become log events
/// instead of coloured console lines.
fn notifier_for(logging: &LoggingConfig) -> Arc<dyn Notifier> {
    match parse_format(&logging.format) {
        Ok(LogFormat::Json) => Arc::new(TracingNotifier),
        _ => Arc::new(ConsoleNotifier),
    }
}

async fn dispatch(state: &AppState, command: Command) -> CommandResult {
    let session = &state.session;

    match command {
        Command::Login { email, password } => {
            session.set_loading(true);
            let user = session
                .log_in(&Credentials::new(email, password))
                .await
                .ok_or("login failed")?;
            print_json(&user)
        }
        Command::Signup {
            email,
            password,
            name,
        } => {
            let mut details = SignUpDetails::new(email, password);
            if let Some(name) = name {
                details = details.with_name(name);
            }
            session.set_loading(true);
            let user = session.sign_up(&details).await.ok_or("sign-up failed")?;
            print_json(&user)
        }
        Command::Logout => {
            session.log_out().await;
            println!("Logged out");
            Ok(())
        }
        Command::Whoami => {
            let user = session.refresh_current_user().await;
            guarded(state, user, "could not load the current user")
        }
        Command::Test { test_type } => {
            let test = session.fetch_test(test_type).await;
            guarded(state, test, "could not fetch the test")
        }
        Command::Submit { test_type, answers } => {
            let answers = read_answers(&answers).await?;
            let result = session.submit_results(test_type, &answers).await;
            guarded(state, result, "could not submit the results")
        }
        Command::ExternalLogin {
            token,
            refresh_token,
        } => {
            let user = session
                .login_with_external_provider(TokenPair::new(token, refresh_token))
                .await;
            guarded(state, user, "could not load the current user")
        }
        Command::Schema | Command::Menu => Ok(()),
    }
}

/// Prints `value` when the session is still logged in, otherwise reports the redirect.
fn guarded<T: Serialize>(state: &AppState, value: Option<T>, failure: &str) -> CommandResult {
    match state.guard.resolve(&state.session.session(), value) {
        Guarded::Render(Some(value)) => print_json(&value),
        Guarded::Render(None) => Err(failure.into()),
        Guarded::Redirect(path) => {
            Err(format!("not logged in; log in first (redirecting to '{}')", path).into())
        }
    }
}

async fn read_answers(path: &Path) -> Result<Value, Box<dyn Error>> {
    debug!("Reading answers from '{}'", path.display());
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| format!("failed to read '{}': {}", path.display(), e))?;
    let answers = serde_json::from_str(&content)
        .map_err(|e| format!("'{}' is not valid JSON: {}", path.display(), e))?;
    Ok(answers)
}

fn print_json<T: Serialize>(value: &T) -> CommandResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Login { .. } => "login",
        Command::Signup { .. } => "signup",
        Command::Logout => "logout",
        Command::Whoami => "whoami",
        Command::Test { .. } => "test",
        Command::Submit { .. } => "submit",
        Command::ExternalLogin { .. } => "external-login",
        Command::Menu => "menu",
        Command::Schema => "schema",
    }
}
