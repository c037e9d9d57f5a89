//! CLI entrypoint for llmdesk
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use llmdesk_application::{
    AppState, KeyValueStore, NotificationSink, SessionError, SessionUseCase,
};
use llmdesk_domain::{ApiKeys, Notification, ProfileUpdate, ProviderId, Theme, UiAction};
use llmdesk_infrastructure::{ConfigLoader, HttpAuthApi, JsonFileStore, MemoryStore, RequestGateway};
use llmdesk_presentation::{Cli, Command, ConsoleFormatter, OutputFormat, SessionSpinner, ThemeChoice};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

type Session = SessionUseCase<HttpAuthApi>;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(ExitCode::SUCCESS);
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
    }
    .map_err(|e| anyhow!("Failed to load configuration: {}", e))?;

    let issues = config.validate();
    if !issues.is_empty() {
        let list: Vec<String> = issues.iter().map(|i| format!("  - {}", i)).collect();
        bail!("Invalid configuration:\n{}", list.join("\n"));
    }

    info!(api = %config.api.base_url, "Starting llmdesk");

    // === Dependency Injection ===
    let storage: Arc<dyn KeyValueStore> = if cli.ephemeral {
        Arc::new(MemoryStore::default())
    } else {
        let path = config.storage.resolve_path();
        debug!(path = %path.display(), "Using state file");
        Arc::new(JsonFileStore::new(path))
    };

    let app = AppState::new(storage);
    let gateway = RequestGateway::new(
        &config.api.base_url,
        app.session.clone(),
        app.session.clone(),
    )
    .context("Failed to build HTTP client")?
    .with_notifier(app.ui.clone())
    .with_behavior(&config.notifications.to_behavior());
    let api = Arc::new(HttpAuthApi::new(Arc::new(gateway)));
    let session = SessionUseCase::new(app.session.clone(), api);

    let command = cli.command.clone().unwrap_or(Command::Whoami);
    let spinner = (!cli.quiet).then(|| SessionSpinner::follow(app.session.subscribe()));

    if command.needs_session() {
        session.hydrate().await;
    }
    let outcome = run(&command, &app, &session, cli.output).await;

    if let Some(spinner) = spinner {
        spinner.finish();
    }
    for notification in app.ui.drain_notifications() {
        eprintln!("{}", ConsoleFormatter::format_notification(&notification));
    }

    match outcome {
        Ok(output) => {
            print!("{}", output);
            Ok(ExitCode::SUCCESS)
        }
        // Backend failures were already reported as notifications.
        Err(SessionError::Api(_)) => Ok(ExitCode::FAILURE),
        Err(e) => Err(e.into()),
    }
}

async fn run(
    command: &Command,
    app: &AppState,
    session: &Session,
    format: OutputFormat,
) -> Result<String, SessionError> {
    match command {
        Command::Login { email, password } => {
            let user = session.login(email, password).await?;
            Ok(format!("Signed in as {} <{}>\n", user.name, user.email))
        }
        Command::Register {
            email,
            password,
            name,
        } => {
            let user = session.register(email, password, name).await?;
            Ok(format!("Account created. Signed in as {} <{}>\n", user.name, user.email))
        }
        Command::Logout => {
            session.logout().await;
            Ok("Signed out\n".to_string())
        }
        Command::Whoami => Ok(show_account(session, format)),
        Command::ApiKeys {
            openai,
            google,
            anthropic,
        } => {
            let mut keys = ApiKeys::default();
            for (provider, key) in [
                (ProviderId::OpenAi, openai),
                (ProviderId::Google, google),
                (ProviderId::Anthropic, anthropic),
            ] {
                if let Some(key) = key {
                    keys.set(provider, key.clone());
                }
            }
            if keys.is_empty() {
                return Ok(show_account(session, format));
            }
            session.update_api_keys(keys).await?;
            app.ui.notify(Notification::success("API keys updated"));
            Ok(show_account(session, format))
        }
        Command::Profile { name, email } => {
            let mut update = ProfileUpdate::default();
            if let Some(name) = name {
                update = update.with_name(name.clone());
            }
            if let Some(email) = email {
                update = update.with_email(email.clone());
            }
            if update == ProfileUpdate::default() {
                return Ok(show_account(session, format));
            }
            session.update_profile(update).await?;
            app.ui.notify(Notification::success("Profile updated"));
            Ok(show_account(session, format))
        }
        Command::ChangePassword {
            current,
            new_password,
        } => {
            session.change_password(current, new_password).await?;
            app.ui.notify(Notification::success("Password changed"));
            Ok(String::new())
        }
        Command::Theme { choice } => {
            match choice {
                Some(ThemeChoice::Light) => app.ui.dispatch(UiAction::SetTheme(Theme::Light)),
                Some(ThemeChoice::Dark) => app.ui.dispatch(UiAction::SetTheme(Theme::Dark)),
                Some(ThemeChoice::Toggle) => app.ui.dispatch(UiAction::ToggleTheme),
                None => {}
            }
            Ok(match format {
                OutputFormat::Text => ConsoleFormatter::format_theme(app.ui.theme()),
                OutputFormat::Json => ConsoleFormatter::format_json(&app.ui.theme()) + "\n",
            })
        }
        Command::Providers => {
            app.sync_provider_keys();
            let llm = app.llm.snapshot();
            Ok(match format {
                OutputFormat::Text => ConsoleFormatter::format_providers(&llm),
                OutputFormat::Json => ConsoleFormatter::format_json(&llm) + "\n",
            })
        }
    }
}

fn show_account(session: &Session, format: OutputFormat) -> String {
    let state = session.state();
    match (state.user(), format) {
        (Some(user), OutputFormat::Json) => ConsoleFormatter::format_json(user) + "\n",
        (Some(user), OutputFormat::Text) => ConsoleFormatter::format_user(user),
        (None, _) => format!(
            "{}Run `llmdesk login` to sign in.\n",
            ConsoleFormatter::format_session(&state)
        ),
    }
}
