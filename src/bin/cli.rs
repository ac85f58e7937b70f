use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use rollcall::{
    db,
    repositories::SqliteUserRepository,
    services::user_service::{CreateUserRequest, UpdatePasswordRequest, UserService},
};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "rollcall-cli")]
#[command(about = "Manage Rollcall accounts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// User management commands
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    /// Register a new user
    Create {
        /// Unique username shown in the navigation bar
        #[arg(short, long)]
        username: String,

        /// Email address used to sign in
        #[arg(short, long)]
        email: String,

        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// List all users
    List,

    /// Set a new password for a user
    SetPassword {
        /// Email address of the user
        #[arg(short, long)]
        email: String,

        /// New password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },
}

fn prompt_password(prompt: &str) -> anyhow::Result<String> {
    use std::io::{self, Write};
    print!("{}: ", prompt);
    io::stdout().flush()?;
    Ok(rpassword::read_password()?)
}

/// Use the password given on the command line, or prompt twice.
fn password_pair(given: Option<String>, prompt: &str) -> anyhow::Result<(String, String)> {
    match given {
        Some(pw) => Ok((pw.clone(), pw)),
        None => {
            let password = prompt_password(prompt)?;
            let confirm = prompt_password("Confirm password")?;
            Ok((password, confirm))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let pool = db::create_pool()
        .await
        .context("failed to open the database")?;
    db::run_migrations(&pool).await?;

    let user_repository = Arc::new(SqliteUserRepository::new(pool));
    let user_service = UserService::new(user_repository);

    match cli.command {
        Commands::User { command } => match command {
            UserCommands::Create {
                username,
                email,
                password,
            } => {
                let (password, password_confirm) = password_pair(password, "Password")?;
                if password != password_confirm {
                    bail!("Passwords do not match");
                }

                let request = CreateUserRequest {
                    username,
                    email,
                    password,
                    password_confirm: Some(password_confirm),
                };

                let user = user_service
                    .create_user(request)
                    .await
                    .context("failed to create user")?;

                println!("User created");
                println!("  ID:       {}", user.id);
                println!("  Username: {}", user.username);
                println!("  Email:    {}", user.email);
            }

            UserCommands::List => {
                let users = user_service.list_users().await?;
                if users.is_empty() {
                    println!("No users found.");
                    return Ok(());
                }

                println!("{:<5} {:<20} {:<40} {:<20}", "ID", "Username", "Email", "Created");
                println!("{}", "-".repeat(85));
                for user in users {
                    println!(
                        "{:<5} {:<20} {:<40} {:<20}",
                        user.id,
                        user.username,
                        user.email,
                        user.created_at.format("%Y-%m-%d %H:%M")
                    );
                }
            }

            UserCommands::SetPassword { email, password } => {
                if user_service.find_user_by_email(&email).await?.is_none() {
                    bail!("User '{}' not found", email);
                }

                let (new_password, password_confirm) = password_pair(password, "New password")?;

                user_service
                    .update_password(UpdatePasswordRequest {
                        email: email.clone(),
                        new_password,
                        new_password_confirm: Some(password_confirm),
                    })
                    .await
                    .context("failed to update password")?;

                println!("Password updated for '{}'", email);
            }
        },
    }

    Ok(())
}
