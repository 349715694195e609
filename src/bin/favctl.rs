//! Command-line favorite toggler.
//!
//! Drives the same toggle client a page script would: the button for the
//! chosen team or player is registered with its current state, the form is
//! submitted, and the resulting button state is printed.
//!
//! # Usage
//!
//! ```bash
//! # Sign in and print the session token
//! favctl login --username mike
//!
//! # Toggle team 42, reading its current state from the home page
//! export FAVCTL_SESSION="1.1760000000.3f5a..."
//! favctl toggle team 42 --from-page /
//!
//! # Toggle player 7, assuming it is currently a favorite
//! favctl toggle player 7 --state active
//! ```

use gridiron_favorites::client::{
    ButtonRegistry, ButtonState, HttpToggleTransport, ToggleForm, ToggleHandler, ToggleResult,
};
use gridiron_favorites::domain::entities::FavoriteKind;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Password;
use std::sync::Arc;

/// Toggle favorite teams and players from the terminal.
#[derive(Parser)]
#[command(name = "favctl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Site base URL
    #[arg(long, env = "FAVCTL_BASE_URL", default_value = "http://localhost:3000", global = true)]
    base_url: String,

    /// Session token from `favctl login`
    #[arg(long, env = "FAVCTL_SESSION", hide_env_values = true, global = true)]
    session: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and print the session token
    Login {
        #[arg(short, long)]
        username: String,

        /// Prompted for when omitted
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Submit a favorite toggle
    Toggle {
        /// `team` or `player`
        kind: FavoriteKind,

        id: i64,

        /// Current button state (`active` or `inactive`)
        #[arg(long, default_value = "inactive", conflicts_with = "from_page")]
        state: ButtonState,

        /// Read the current button state from this page instead
        #[arg(long)]
        from_page: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let transport = HttpToggleTransport::new(&cli.base_url, cli.session)?;

    match cli.command {
        Commands::Login { username, password } => login(&transport, &username, password).await,
        Commands::Toggle {
            kind,
            id,
            state,
            from_page,
        } => toggle(transport, kind, id, state, from_page).await,
    }
}

async fn login(
    transport: &HttpToggleTransport,
    username: &str,
    password: Option<String>,
) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => Password::new().with_prompt("Password").interact()?,
    };

    match transport.login(username, &password).await? {
        Some(session) => {
            eprintln!("{}", format!("✅ Signed in as {username}").green().bold());
            println!("{session}");
            Ok(())
        }
        None => bail!("Invalid username/password!"),
    }
}

async fn toggle(
    transport: HttpToggleTransport,
    kind: FavoriteKind,
    id: i64,
    state: ButtonState,
    from_page: Option<String>,
) -> Result<()> {
    let buttons = match from_page {
        Some(path) => {
            let html = transport
                .fetch_page(&path)
                .await
                .with_context(|| format!("Failed to fetch {path}"))?;
            let buttons = ButtonRegistry::from_html(&html);
            if !buttons.contains(kind, id) {
                bail!("No {kind} button with id {id} on {path} (are you signed in?)");
            }
            buttons
        }
        None => {
            let buttons = ButtonRegistry::new();
            buttons.register(kind, id, state);
            buttons
        }
    };

    let form = match kind {
        FavoriteKind::Team => ToggleForm::team(id),
        FavoriteKind::Player => ToggleForm::player(id),
    };

    let handler = ToggleHandler::new(Arc::new(transport), buttons);

    match handler.handle_submit(form).await? {
        ToggleResult::Toggled { state, server } => {
            let shown = match state {
                ButtonState::Active => state.to_string().red().bold(),
                ButtonState::Inactive => state.to_string().bright_black().bold(),
            };
            println!("{kind} {id}: {shown}");
            if let Some(status) = server {
                eprintln!("  server: {}", status.status.as_str());
            }
        }
        ToggleResult::Unauthorized => {
            eprintln!("{}", "⚠️  Unauthorized: sign in with `favctl login`".yellow());
            if let Some(state) = handler.buttons().state(kind, id) {
                println!("{kind} {id}: {state}");
            }
        }
    }

    Ok(())
}
