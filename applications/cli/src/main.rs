//! Roster - terminal admin client for the user registry
use anyhow::{anyhow, bail, Context};
use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use roster_cli::{
    config::CliConfig,
    views::{messages, ChartView, LoginView, UsersView},
};
use roster_client::{encode_avatar_file, strip_data_url, RosterClient};
use roster_core::{Gender, SortDirection, SortField, SortState, UserFields, UserId};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Manage user records and view registration charts", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./roster.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log requests to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the token
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long, env = "ROSTER_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log out and forget the token
    Logout,
    /// Show the logged-in user
    Me,
    /// Manage user records
    #[command(subcommand)]
    Users(UsersCommand),
    /// Registration charts
    #[command(subcommand)]
    Chart(ChartCommand),
}

#[derive(Subcommand)]
enum UsersCommand {
    /// List users
    List {
        /// Column to sort by (id, name, birth_year, gender, is_admin, created_at, created_by)
        #[arg(short, long)]
        sort: Option<SortField>,
        /// Sort descending (applies to created_at when --sort is omitted)
        #[arg(long)]
        desc: bool,
    },
    /// Create a user
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        birth_year: i32,
        #[arg(long)]
        gender: Gender,
        #[arg(long)]
        admin: bool,
        #[arg(long, env = "ROSTER_NEW_PASSWORD", hide_env_values = true)]
        password: String,
        #[command(flatten)]
        avatar: AvatarArgs,
    },
    /// Update a user; omitted fields keep their current values
    Update {
        id: UserId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        birth_year: Option<i32>,
        #[arg(long)]
        gender: Option<Gender>,
        #[arg(long)]
        admin: Option<bool>,
        /// New password (empty keeps the current one)
        #[arg(long, default_value = "")]
        password: String,
        #[command(flatten)]
        avatar: AvatarArgs,
    },
    /// Delete a user
    Delete { id: UserId },
    /// Download a user's avatar
    Avatar {
        id: UserId,
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Args)]
struct AvatarArgs {
    /// Image file to upload as avatar
    #[arg(long, conflicts_with = "avatar_data")]
    avatar: Option<PathBuf>,
    /// Avatar as base64 or a data: URL
    #[arg(long)]
    avatar_data: Option<String>,
}

impl AvatarArgs {
    async fn payload(&self) -> anyhow::Result<Option<String>> {
        if let Some(path) = &self.avatar {
            return Ok(Some(encode_avatar_file(path).await?));
        }
        Ok(self
            .avatar_data
            .as_deref()
            .map(|data| strip_data_url(data).to_string()))
    }
}

#[derive(Subcommand)]
enum ChartCommand {
    /// Registrations per hour of a day
    Hours {
        /// Day (YYYY-MM-DD), defaults to today (UTC)
        #[arg(short, long)]
        day: Option<NaiveDate>,
        /// Bar width in characters
        #[arg(short, long, default_value_t = 50)]
        width: usize,
    },
    /// Registrations per minute of one hour
    Minutes {
        /// Day (YYYY-MM-DD), defaults to today (UTC)
        #[arg(short, long)]
        day: Option<NaiveDate>,
        /// Hour of the day (0-23)
        #[arg(long, default_value_t = 0)]
        hour: u32,
        #[arg(short, long, default_value_t = 50)]
        width: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose {
        "roster=debug,roster_cli=debug,roster_client=debug"
    } else {
        "roster=warn,roster_cli=warn,roster_client=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = CliConfig::load(cli.config.as_deref())?;
    config.validate()?;
    tracing::debug!(base_url = %config.api.base_url, "Configuration loaded");

    let client = RosterClient::new(config.client_config(), config.session())?;

    match cli.command {
        Commands::Login { username, password } => login(&client, &username, &password).await,
        Commands::Logout => {
            client.logout().await;
            println!("Logged out");
            Ok(())
        }
        Commands::Me => me(&client).await,
        Commands::Users(command) => users(&client, command).await,
        Commands::Chart(command) => chart(&client, command).await,
    }
}

/// Error for a failed view action, with a login hint when relevant.
fn view_error(message: Option<String>, login_required: bool) -> anyhow::Error {
    let message = message.unwrap_or_else(|| "Request failed".to_string());
    if login_required {
        anyhow!("{} ({})", message, messages::LOGIN_HINT)
    } else {
        anyhow!(message)
    }
}

async fn login(client: &RosterClient, username: &str, password: &str) -> anyhow::Result<()> {
    let mut view = LoginView::new();
    match view.submit(client, username, password).await {
        Some(me) => {
            let role = if me.is_admin { "admin" } else { "user" };
            println!("Logged in as {} ({})", me.name, role);
            Ok(())
        }
        None => Err(view_error(view.error, false)),
    }
}

async fn me(client: &RosterClient) -> anyhow::Result<()> {
    let me = client.current_user().await.map_err(|e| {
        if e.is_auth_error() {
            anyhow!("{} ({})", messages::SESSION_EXPIRED, messages::LOGIN_HINT)
        } else {
            anyhow!(e)
        }
    })?;

    println!("ID:         {}", me.id);
    println!("Name:       {}", me.name);
    println!("Birth year: {}", me.birth_year);
    println!("Gender:     {}", me.gender);
    println!("Admin:      {}", if me.is_admin { "yes" } else { "no" });
    println!("Created:    {}", me.created_at);
    println!("Created by: {}", me.created_by.as_deref().unwrap_or("-"));
    if let Some(path) = &me.avatar_path {
        println!("Avatar:     {}", client.avatar_url(path));
    }
    Ok(())
}

async fn users(client: &RosterClient, command: UsersCommand) -> anyhow::Result<()> {
    let mut view = UsersView::new();

    match command {
        UsersCommand::List { sort, desc } => {
            if sort.is_some() || desc {
                view = UsersView::with_sort(list_sort(sort, desc));
            }
            if !view.refetch(client).await {
                return Err(view_error(view.error.take(), view.login_required()));
            }
            print!("{}", view.render());
        }
        UsersCommand::Create {
            name,
            birth_year,
            gender,
            admin,
            password,
            avatar,
        } => {
            let mut fields = UserFields::new(name, birth_year, gender, password);
            fields.is_admin = admin;
            fields.avatar_base64 = avatar.payload().await?;
            fields.validate(true)?;

            if !view.create(client, &fields).await {
                return Err(view_error(view.error.take(), view.login_required()));
            }
            println!("Created user {}", fields.name);
            print!("{}", view.render());
        }
        UsersCommand::Update {
            id,
            name,
            birth_year,
            gender,
            admin,
            password,
            avatar,
        } => {
            if !view.refetch(client).await {
                return Err(view_error(view.error.take(), view.login_required()));
            }
            let current = view
                .find(id)
                .with_context(|| format!("User {} not found", id))?;

            let mut fields = UserFields::from_record(current);
            if let Some(name) = name {
                fields.name = name;
            }
            if let Some(birth_year) = birth_year {
                fields.birth_year = birth_year;
            }
            if let Some(gender) = gender {
                fields.gender = gender;
            }
            if let Some(admin) = admin {
                fields.is_admin = admin;
            }
            fields.password = password;
            fields.avatar_base64 = avatar.payload().await?;
            fields.validate(false)?;

            if !view.update(client, id, &fields).await {
                return Err(view_error(view.error.take(), view.login_required()));
            }
            println!("Updated user {}", id);
        }
        UsersCommand::Delete { id } => {
            if !view.delete(client, id).await {
                return Err(view_error(view.error.take(), view.login_required()));
            }
            println!("Deleted user {}", id);
        }
        UsersCommand::Avatar { id, output } => {
            if !view.refetch(client).await {
                return Err(view_error(view.error.take(), view.login_required()));
            }
            let user = view
                .find(id)
                .with_context(|| format!("User {} not found", id))?;
            let Some(path) = user.avatar_path.as_deref() else {
                bail!("User {} has no avatar", id);
            };

            let size = client.download_avatar(path, &output).await?;
            println!(
                "Saved {} ({} bytes) to {}",
                client.avatar_url(path),
                size,
                output.display()
            );
        }
    }

    Ok(())
}

/// Order for `users list`: the default column when none is given, ascending
/// unless `--desc`.
fn list_sort(field: Option<SortField>, desc: bool) -> SortState {
    let field = field.unwrap_or(SortState::default().field);
    let direction = if desc {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    };
    SortState::new(field, direction)
}

async fn chart(client: &RosterClient, command: ChartCommand) -> anyhow::Result<()> {
    let today = Utc::now().date_naive();

    let (mut view, width) = match command {
        ChartCommand::Hours { day, width } => (ChartView::new(day.unwrap_or(today)), width),
        ChartCommand::Minutes { day, hour, width } => {
            (ChartView::minutes(day.unwrap_or(today), hour)?, width)
        }
    };

    if !view.load(client).await {
        return Err(view_error(view.error.take(), view.login_required()));
    }
    print!("{}", view.render(width));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desc_without_sort_uses_default_column() {
        let state = list_sort(None, true);
        assert_eq!(state.field, SortField::CreatedAt);
        assert_eq!(state.direction, SortDirection::Descending);
    }

    #[test]
    fn test_explicit_sort_is_ascending_by_default() {
        let state = list_sort(Some(SortField::Name), false);
        assert_eq!(state, SortState::new(SortField::Name, SortDirection::Ascending));
    }

    #[test]
    fn test_desc_flag_parses_without_sort() {
        let cli = Cli::try_parse_from(["roster", "users", "list", "--desc"]).unwrap();
        match cli.command {
            Commands::Users(UsersCommand::List { sort, desc }) => {
                assert!(sort.is_none());
                assert!(desc);
            }
            _ => panic!("Expected users list"),
        }
    }
}
