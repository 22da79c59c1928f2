use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use studentdesk_cli::{accounts, seeder};
use studentdesk_config::{DatabaseConfig, StoreBackend};
use studentdesk_db::{PgPool, PgStudentStore, PgUserStore, StudentStore, init_db_pool};

#[derive(Parser)]
#[command(name = "studentdesk-cli")]
#[command(about = "studentdesk CLI - Administrative tools for the student records API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a local login account
    CreateUser {
        /// Login name
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Name shown in the admin console
        #[arg(short = 'n', long)]
        display_name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Insert fake students
    Seed {
        /// Number of students to create
        #[arg(short = 's', long, default_value = "50")]
        students: usize,
    },
    /// Delete every student
    ClearStudents,
    /// Apply pending database migrations
    Migrate,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let config = match DatabaseConfig::from_env() {
        Ok(config) => config,
        Err(e) => fail("Invalid database configuration", e),
    };
    if config.backend() == StoreBackend::Memory {
        fail(
            "The CLI needs a PostgreSQL database",
            "DATABASE_URL points at the in-memory store",
        );
    }

    let pool = match init_db_pool(&config) {
        Ok(pool) => pool,
        Err(e) => fail("Failed to create database pool", e),
    };

    match cli.command {
        Commands::CreateUser {
            username,
            display_name,
            email,
            password,
        } => handle_create_user(pool, username, display_name, email, password).await,
        Commands::Seed { students } => handle_seed(pool, students).await,
        Commands::ClearStudents => handle_clear_students(pool).await,
        Commands::Migrate => handle_migrate(pool).await,
    }
}

fn fail(context: &str, err: impl std::fmt::Display) -> ! {
    eprintln!("\n❌ {}: {}", context, err);
    std::process::exit(1);
}

fn prompt(label: &str) -> String {
    Input::new()
        .with_prompt(label)
        .interact_text()
        .unwrap_or_else(|e| fail(&format!("Failed to read {}", label.to_lowercase()), e))
}

async fn handle_create_user(
    pool: PgPool,
    username: Option<String>,
    display_name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) {
    let username = username.unwrap_or_else(|| prompt("Username"));
    let display_name = display_name.unwrap_or_else(|| prompt("Display name"));
    let email = email.unwrap_or_else(|| prompt("Email address"));
    let password = password.unwrap_or_else(|| {
        Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .unwrap_or_else(|e| fail("Failed to read password", e))
    });

    let store = PgUserStore::new(pool);
    match accounts::create_local_user(&store, &username, &display_name, &email, &password).await {
        Ok(user) => {
            println!("\n✅ User created successfully!");
            println!("   Username: {}", username);
            println!("   Name: {}", user.display_name);
        }
        Err(e) => fail("Error creating user", e),
    }
}

async fn handle_seed(pool: PgPool, students: usize) {
    let store = PgStudentStore::new(pool);
    if let Err(e) = seeder::seed_students(&store, students).await {
        fail("Error seeding students", e);
    }
}

async fn handle_clear_students(pool: PgPool) {
    let store = PgStudentStore::new(pool);
    match store.clear().await {
        Ok(count) => println!("✅ Deleted {} students", count),
        Err(e) => fail("Error clearing students", e),
    }
}

async fn handle_migrate(pool: PgPool) {
    match studentdesk_db::run_migrations(&pool).await {
        Ok(()) => println!("✅ Migrations applied"),
        Err(e) => fail("Error applying migrations", e),
    }
}
