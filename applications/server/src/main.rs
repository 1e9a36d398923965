/// Cantor Server - setlist manager HTTP server
use cantor_core::types::User;
use cantor_core::DocumentStore;
use cantor_server::{
    api::create_router, config::ServerConfig, services::AuthService, state::AppState,
};
use cantor_storage::SqliteStore;
use clap::{Parser, Subcommand};
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cantor-server")]
#[command(about = "Cantor setlist manager server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create a new user
    AddUser {
        /// Sign-in email
        #[arg(short, long)]
        email: String,
        /// Display name
        #[arg(short, long)]
        name: String,
        /// Password
        #[arg(short, long)]
        password: String,
        /// Grant song-library admin rights
        #[arg(long)]
        admin: bool,
    },
    /// List all users
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cantor_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => serve().await?,
        Commands::AddUser {
            email,
            name,
            password,
            admin,
        } => add_user(&email, &name, &password, admin).await?,
        Commands::ListUsers => list_users().await?,
    }

    Ok(())
}

async fn serve() -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    config.validate()?;

    tracing::info!("Starting Cantor Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let store = connect(&config).await?;
    tracing::info!("Database connected");

    let auth_service = Arc::new(AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
        config.auth.jwt_refresh_expiration_days,
    ));

    let app_state = AppState::new(store, Arc::clone(&auth_service));
    let app = create_router(app_state, auth_service);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn connect(config: &ServerConfig) -> anyhow::Result<Arc<SqliteStore>> {
    let pool = cantor_storage::create_pool(&config.storage.database_url).await?;
    cantor_storage::run_migrations(&pool).await?;
    Ok(Arc::new(SqliteStore::new(pool)))
}

async fn add_user(email: &str, name: &str, password: &str, admin: bool) -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    let store = connect(&config).await?;

    let auth_service = AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
        config.auth.jwt_refresh_expiration_days,
    );

    let mut user = User::new(email.trim().to_lowercase(), name.trim());
    user.is_admin = admin;
    let hash = auth_service.hash_password(password)?;
    store.create_user(&user, &hash).await?;

    println!(
        "Created {} user {} ({})",
        if admin { "admin" } else { "member" },
        user.name,
        user.email
    );
    Ok(())
}

async fn list_users() -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    let store = connect(&config).await?;

    let users = store.get_all_users().await?;

    println!("Users:");
    for user in users {
        let role = if user.is_admin { "admin" } else { "member" };
        println!("  {} - {} <{}> [{}]", user.id, user.name, user.email, role);
    }

    Ok(())
}
