//! GRC Console - operator tool for the GRC portal client
//!
//! Inspects the role/permission catalog, signs in against the auth service
//! and edits the request form configuration in the local store.

mod render;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use grc_client::logger::init_logger;
use grc_client::{
    AuthSession, ClientConfig, Credentials, FieldPatch, FormConfigStore, KeyValueStore,
    MoveDirection,
};
use shared::rbac::permissions_by_area;
use shared::{Permission, RequestType, Role, default_navigation, visible_navigation};

#[derive(Parser, Debug)]
#[command(name = "grc-console", about = "GRC portal operator console")]
struct Cli {
    /// Auth service base URL
    #[arg(long, env = "GRC_API_URL", global = true)]
    api_url: Option<String>,

    /// Directory holding the session and form configuration
    #[arg(long, env = "GRC_STORAGE_DIR", global = true)]
    storage_dir: Option<PathBuf>,

    /// Log level used when RUST_LOG is unset
    #[arg(long, env = "GRC_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List roles
    Roles,
    /// List a role's permissions by area
    Permissions { role: Role },
    /// Check whether a role holds a permission
    Check { role: Role, permission: Permission },
    /// Print the navigation tree visible to a role (default: signed-in user)
    Nav {
        #[arg(long)]
        role: Option<Role>,
    },
    /// Sign in and cache the session
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "GRC_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out and clear the cached session
    Logout,
    /// Show the cached session
    Whoami {
        /// Confirm the session with the auth service
        #[arg(long)]
        reconcile: bool,
    },
    /// Request form configuration
    #[command(subcommand)]
    Forms(FormsCommand),
}

#[derive(Subcommand, Debug)]
enum FormsCommand {
    /// Show a request type's fields
    Show {
        request_type: RequestType,
        /// Include disabled fields
        #[arg(long)]
        all: bool,
    },
    /// Change one field
    SetField {
        request_type: RequestType,
        field: String,
        #[arg(long)]
        enabled: Option<bool>,
        #[arg(long)]
        required: Option<bool>,
        #[arg(long)]
        label: Option<String>,
    },
    /// Move a field up or down
    Move {
        request_type: RequestType,
        field: String,
        direction: Direction,
    },
    /// List catalog fields not yet on a request type
    Catalog { request_type: RequestType },
    /// Add a catalog field
    Add {
        request_type: RequestType,
        field: String,
    },
    /// Remove a field added from the catalog
    Remove {
        request_type: RequestType,
        field: String,
    },
    /// Discard all customizations
    Reset,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Direction {
    Up,
    Down,
}

impl From<Direction> for MoveDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => MoveDirection::Up,
            Direction::Down => MoveDirection::Down,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.api_url {
        config.base_url = url;
    }
    if let Some(dir) = cli.storage_dir {
        config = config.with_storage_dir(dir);
    }
    if let Some(level) = cli.log_level {
        config = config.with_log_level(level);
    }
    init_logger(&config.log_level, config.log_dir.as_deref());

    match cli.command {
        Command::Roles => {
            for role in Role::ALL {
                println!(
                    "{:<24} {:<26} {:>3} permissions  {}",
                    role.as_str(),
                    role.display_name(),
                    role.permissions().len(),
                    role.description()
                );
            }
        }
        Command::Permissions { role } => {
            println!("{} ({})", role.display_name(), role);
            for (area, permissions) in permissions_by_area(role) {
                println!("  {}", area.display_name());
                for permission in permissions {
                    println!("    {}", permission);
                }
            }
        }
        Command::Check { role, permission } => {
            let granted = role.has_permission(permission);
            println!("{} {} {}", role, if granted { "has" } else { "lacks" }, permission);
            if !granted {
                std::process::exit(1);
            }
        }
        Command::Nav { role } => {
            let tree = default_navigation();
            let visible = match role {
                Some(role) => visible_navigation(&tree, role),
                None => {
                    let mut session = open_session(&config)?;
                    if !session.restore() {
                        bail!("not signed in; pass --role or run `grc-console login`");
                    }
                    session.visible_navigation(&tree)
                }
            };
            render::print_navigation(&visible);
        }
        Command::Login { username, password } => {
            let mut session = open_session(&config)?;
            let user = session
                .login(&Credentials::new(username, password))
                .await
                .map_err(|e| anyhow::anyhow!("[{}] {}", e.code(), e))?;
            println!("Signed in as {} ({})", user.name, user.role.display_name());
        }
        Command::Logout => {
            let mut session = open_session(&config)?;
            session.restore();
            session.logout().await;
            println!("Signed out");
        }
        Command::Whoami { reconcile } => {
            let mut session = open_session(&config)?;
            let restored = if reconcile {
                session.restore_and_reconcile().await
            } else {
                session.restore()
            };
            match session.require_user() {
                Ok(user) if restored => render::print_user(user, session.logged_in_at()),
                Ok(_) => println!("Not signed in"),
                Err(e) => println!("Not signed in: [{}] {}", e.code(), e),
            }
        }
        Command::Forms(command) => run_forms(&config, command)?,
    }

    Ok(())
}

fn open_store(config: &ClientConfig) -> anyhow::Result<Arc<dyn KeyValueStore>> {
    let store = config
        .open_store()
        .with_context(|| format!("opening storage at {}", config.storage_dir.display()))?;
    Ok(Arc::new(store))
}

fn open_session(config: &ClientConfig) -> anyhow::Result<AuthSession> {
    let client = config.build_http_client()?;
    Ok(AuthSession::new(Arc::new(client), open_store(config)?))
}

fn run_forms(config: &ClientConfig, command: FormsCommand) -> anyhow::Result<()> {
    let mut forms = FormConfigStore::load(open_store(config)?);

    match command {
        FormsCommand::Show { request_type, all } => {
            let config = forms
                .config(request_type)
                .with_context(|| format!("{} is not configured", request_type))?;
            render::print_form(config, all);
            return Ok(());
        }
        FormsCommand::Catalog { request_type } => {
            for field in forms.available_catalog_fields(request_type) {
                println!("{:<20} {:<22} {}", field.id, field.label, field.category);
            }
            return Ok(());
        }
        FormsCommand::SetField {
            request_type,
            field,
            enabled,
            required,
            label,
        } => {
            let patch = FieldPatch {
                enabled,
                required,
                label,
                ..Default::default()
            };
            forms.update_field(request_type, &field, &patch)?;
        }
        FormsCommand::Move {
            request_type,
            field,
            direction,
        } => {
            if !forms.move_field(request_type, &field, direction.into())? {
                println!("{} is already at the {:?} end", field, direction);
                return Ok(());
            }
        }
        FormsCommand::Add { request_type, field } => {
            forms.add_field_from_catalog(request_type, &field)?;
        }
        FormsCommand::Remove { request_type, field } => {
            forms.remove_field(request_type, &field)?;
        }
        FormsCommand::Reset => {
            forms.reset_to_default()?;
            println!("Form configuration reset");
            return Ok(());
        }
    }

    if forms.has_unsaved_changes() {
        forms.save()?;
        println!("Saved");
    }
    Ok(())
}
