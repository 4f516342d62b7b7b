//! Administrative command-line tasks for the salon backend.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use salon_api::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use salon_db::models::user::CreateUser;
use salon_db::repositories::UserRepo;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "salon-admin")]
#[command(about = "Administrative tasks for the salon backend", long_about = None)]
struct Cli {
    /// PostgreSQL connection URL.
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an admin user, or promote and reset an existing one
    CreateAdmin {
        #[arg(long, env = "ADMIN_NAME", default_value = "Admin")]
        name: String,
        #[arg(long, env = "ADMIN_EMAIL")]
        email: String,
        #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Insert the default categories that do not exist yet
    SeedCategories,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "salon_admin=info,salon_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let pool = salon_db::create_pool(&cli.database_url)
        .await
        .context("failed to connect to database")?;
    salon_db::run_migrations(&pool)
        .await
        .context("failed to run database migrations")?;

    match cli.command {
        Commands::CreateAdmin {
            name,
            email,
            password,
        } => {
            let email = email.trim().to_lowercase();
            if email.is_empty() || !email.contains('@') {
                bail!("'{email}' is not a valid email address");
            }
            if let Err(message) = validate_password_strength(&password, MIN_PASSWORD_LENGTH) {
                bail!(message);
            }

            let password_hash = hash_password(&password)
                .map_err(|e| anyhow::anyhow!("failed to hash password: {e}"))?;

            let user = UserRepo::upsert(
                &pool,
                &CreateUser {
                    name: name.trim().to_string(),
                    email,
                    password_hash,
                    is_admin: true,
                },
            )
            .await
            .context("failed to save admin user")?;

            tracing::info!(user_id = user.id, email = %user.email, "Admin user saved");
            println!("Admin {} <{}> is ready (id {})", user.name, user.email, user.id);
        }
        Commands::SeedCategories => {
            let created = salon_db::seed::seed_default_categories(&pool)
                .await
                .context("failed to seed categories")?;
            println!("Created {created} categories");
        }
    }

    pool.close().await;
    Ok(())
}
