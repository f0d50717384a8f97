use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use minden_core::password::{hash_password, validate_password};
use minden_core::{AirportUser, NewUser, PageRequest, UserRole};
use minden_db::{Database, DatabaseConfig};

#[derive(Parser)]
#[command(name = "minden", version, about = "Minden Airport operator tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,

    /// Create an account with the ADMIN role
    CreateAdmin {
        #[arg(short, long)]
        email: String,

        /// Password (reads from MINDEN_ADMIN_PASSWORD if not provided)
        #[arg(short, long, env = "MINDEN_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,

        #[arg(long, default_value = "Admin")]
        first_name: String,

        #[arg(long, default_value = "User")]
        last_name: String,
    },

    /// Change the role of an existing account
    SetRole {
        #[arg(short, long)]
        email: String,

        /// One of USER, STAFF, MANAGER, ADMIN
        #[arg(short, long)]
        role: String,
    },

    /// List registered accounts, newest first
    Users {
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        #[arg(short, long, default_value_t = 50)]
        limit: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("minden=info".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let db = connect_db().await?;

    match cli.command {
        Commands::Migrate => {
            db.migrate().await.context("Migration failed")?;
            println!("Migrations applied");
        }
        Commands::CreateAdmin {
            email,
            password,
            first_name,
            last_name,
        } => {
            db.migrate().await.context("Migration failed")?;
            cmd_create_admin(&db, &email, &password, first_name, last_name).await?;
        }
        Commands::SetRole { email, role } => cmd_set_role(&db, &email, &role).await?,
        Commands::Users { page, limit } => cmd_users(&db, page, limit).await?,
    }

    Ok(())
}

/// Connect using CONNECTIONSTRING (or DATABASE_URL).
async fn connect_db() -> Result<Database> {
    let config = DatabaseConfig::from_env().context("Database is not configured")?;
    let db = Database::connect(&config)
        .await
        .context("Failed to connect to database")?;
    Ok(db)
}

async fn cmd_create_admin(
    db: &Database,
    email: &str,
    password: &str,
    first_name: String,
    last_name: String,
) -> Result<()> {
    let email = AirportUser::normalize_email(email);
    if !email.contains('@') {
        bail!("'{email}' is not a valid email address");
    }
    validate_password(password)?;

    let repo = db.user_repo();
    if repo.email_exists(&email).await? {
        bail!("An account with email {email} already exists; use set-role instead");
    }

    let user = repo
        .create(&NewUser {
            first_name,
            last_name,
            birthdate: None,
            password_hash: hash_password(password)?,
            email,
            phone: None,
            role: UserRole::Admin,
        })
        .await?;

    tracing::info!(user_id = %user.id, "Admin account created");
    println!("Created admin {} ({})", user.email, user.id);
    Ok(())
}

async fn cmd_set_role(db: &Database, email: &str, role: &str) -> Result<()> {
    let role: UserRole = role.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let repo = db.user_repo();
    let user = repo
        .get_by_email(email)
        .await?
        .with_context(|| format!("No account with email {email}"))?;

    repo.set_role(user.id, role).await?;
    println!("{} is now {role}", user.email);
    Ok(())
}

async fn cmd_users(db: &Database, page: u32, limit: u32) -> Result<()> {
    let page = db
        .user_repo()
        .list(PageRequest::new(Some(page), Some(limit)))
        .await?;

    if page.items.is_empty() {
        println!("No users on page {}", page.page);
        return Ok(());
    }

    println!(
        "Users (page {}, {} per page, {} total):\n",
        page.page, page.limit, page.total
    );
    for user in &page.items {
        let state = if user.active { "active" } else { "inactive" };
        println!(
            "  {:<36}  {:<8}  {:<8}  {} {} <{}>",
            user.id, user.role.as_str(), state, user.first_name, user.last_name, user.email
        );
    }

    Ok(())
}
