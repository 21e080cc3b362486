use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use appeals_api_client::{AppealsClient, AppealsClientConfig};
use appeals_client_core::gate::{GateDecision, guard};
use appeals_client_core::session::{SessionStore, TokenPair};
use appeals_console_state::detail::AppealView;
use appeals_console_state::list::AppealsListView;
use appeals_console_state::login::{LoginForm, LoginSettled};
use appeals_console_state::resource::ResourceState;
use clap::{Parser, Subcommand};

pub mod session_file;

use crate::session_file::FileSessionStore;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_SESSION_FILE: &str = ".appeals-session.json";

#[derive(Debug, Parser)]
#[command(name = "appeals-console", about = "Admin console for user appeals")]
pub struct Cli {
    /// Backend base URL.
    #[arg(long, env = "APPEALS_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Where the session token pair is kept between runs.
    #[arg(long, env = "APPEALS_SESSION_FILE", default_value = DEFAULT_SESSION_FILE)]
    pub session_file: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Exchange admin credentials for a session and land on the appeals list.
    Login { username: String, password: String },
    /// List open appeals.
    Appeals,
    /// Show one appeal with its message thread.
    Appeal { appeal_id: u64 },
    /// Append an admin reply to an appeal.
    Reply { appeal_id: u64, message: String },
}

pub async fn run(cli: Cli) -> Result<()> {
    let client = AppealsClient::new(AppealsClientConfig::new(&cli.base_url))?;
    let store = FileSessionStore::new(cli.session_file);

    match cli.command {
        Command::Login { username, password } => {
            run_login(&client, &store, &username, &password).await
        }
        Command::Appeals => run_list(&client, &store).await,
        Command::Appeal { appeal_id } => run_detail(&client, &store, appeal_id).await,
        Command::Reply { appeal_id, message } => {
            run_reply(&client, &store, appeal_id, &message).await
        }
    }
}

/// The gate every protected command passes through before any request goes
/// out. Redirecting to login becomes a refusal with a hint.
fn gated_session(store: &FileSessionStore) -> Result<TokenPair> {
    let session = store.load_session().context("failed to read session file")?;
    if guard(session.as_ref()) == GateDecision::RedirectToLogin {
        bail!("not logged in; run `appeals-console login <username> <password>` first");
    }
    session.ok_or_else(|| anyhow!("session file is missing a token pair"))
}

async fn run_login(
    client: &AppealsClient,
    store: &FileSessionStore,
    username: &str,
    password: &str,
) -> Result<()> {
    let mut form = LoginForm::new();
    form.set_username(username);
    form.set_password(password);

    let Some(request) = form.begin_submit() else {
        bail!("{}", form.error().unwrap_or("login rejected"));
    };

    let outcome = client.login(&request).await;
    match form.finish_submit(outcome) {
        LoginSettled::Authenticated(pair) => {
            store
                .persist_session(&pair)
                .context("failed to persist session")?;
            tracing::debug!(path = %store.path().display(), "session persisted");
            println!("Logged in.");
            // The default landing view after login.
            run_list(client, store).await
        }
        LoginSettled::Rejected => match form.error() {
            Some(message) => bail!("{message}"),
            None => bail!("login failed"),
        },
    }
}

async fn run_list(client: &AppealsClient, store: &FileSessionStore) -> Result<()> {
    let session = gated_session(store)?;

    let mut view = AppealsListView::new();
    let ticket = view.begin_fetch();
    let outcome = client
        .list_appeals(Some(&session.token))
        .await
        .map_err(|error| error.view_message());
    view.settle_fetch(ticket, outcome);

    match view.state() {
        ResourceState::Pending => println!("Loading..."),
        ResourceState::Ready(appeals) => {
            println!("{:<6} Title", "Id");
            for appeal in appeals {
                println!("{:<6} {}", appeal.id, appeal.title);
            }
        }
        ResourceState::Failed(message) => bail!("{message}"),
    }
    Ok(())
}

async fn run_detail(
    client: &AppealsClient,
    store: &FileSessionStore,
    appeal_id: u64,
) -> Result<()> {
    let session = gated_session(store)?;

    let mut view = AppealView::new();
    let ticket = view.begin_fetch();
    let outcome = client
        .fetch_appeal(Some(&session.token), appeal_id)
        .await
        .map_err(|error| error.view_message());
    view.settle_fetch(ticket, outcome);

    render_detail(&view)
}

async fn run_reply(
    client: &AppealsClient,
    store: &FileSessionStore,
    appeal_id: u64,
    message: &str,
) -> Result<()> {
    let session = gated_session(store)?;

    let mut view = AppealView::new();
    let ticket = view.begin_fetch();
    let outcome = client
        .fetch_appeal(Some(&session.token), appeal_id)
        .await
        .map_err(|error| error.view_message());
    view.settle_fetch(ticket, outcome);

    if let ResourceState::Failed(message) = view.state() {
        bail!("{message}");
    }

    view.set_draft(message);
    let Some(request) = view.send_request() else {
        bail!("appeal {appeal_id} is not loaded");
    };

    match client
        .add_message(Some(&session.token), appeal_id, &request)
        .await
    {
        Ok(()) => {
            view.apply_send_success(request);
            println!("Message added.");
            render_detail(&view)
        }
        Err(error) => {
            view.apply_send_failure(error.view_message());
            match view.send_error() {
                Some(message) => bail!("{message}"),
                None => bail!("send failed"),
            }
        }
    }
}

fn render_detail(view: &AppealView) -> Result<()> {
    match view.state() {
        ResourceState::Pending => println!("Loading..."),
        ResourceState::Ready(appeal) => {
            println!("Appeal #{}: {}", appeal.id, appeal.title);
            println!("Messages:");
            for message in &appeal.messages {
                if message.is_admin {
                    println!("  [By admin] {}", message.text);
                } else {
                    println!("  {}", message.text);
                }
            }
        }
        ResourceState::Failed(message) => bail!("{message}"),
    }
    Ok(())
}
