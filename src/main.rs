use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use planet_api::client::PlanetClient;
use planet_api::config::{ApiConfig, StorageBackend, DEFAULT_PROBLEM_BASE_URI};
use planet_api::models::{PlanetRequest, PlanetResponse};
use planet_api::repository::{InMemoryPlanetRepository, PlanetRepository};
use planet_api::service::PlanetService;
use planet_api::{api, db};

#[derive(Parser)]
#[command(name = "planet-api")]
#[command(about = "CRUD REST service for planets")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Server options used when no subcommand is given
    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// List all planets on a running server
    List,
    /// Show one planet by id
    Get { id: Uuid },
    /// Find a planet by name (case-insensitive)
    Search { name: String },
    /// Create a planet
    Create {
        name: String,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Replace a planet's name and description
    Update {
        id: Uuid,
        name: String,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete a planet by id
    Delete { id: Uuid },
}

#[derive(clap::Args)]
struct ServeArgs {
    /// Address to bind
    #[arg(long, env = "PLANET_API_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port for HTTP API
    #[arg(short, long, env = "PLANET_API_PORT", default_value = "8080")]
    port: u16,

    /// Planet store to use
    #[arg(long, env = "PLANET_API_STORAGE", value_enum, default_value = "sqlite")]
    storage: StorageBackend,

    /// SQLite database file (defaults to the platform data directory)
    #[arg(long, env = "PLANET_API_DATABASE")]
    database: Option<PathBuf>,

    /// Base URI for problem `type` values
    #[arg(long, env = "PLANET_API_PROBLEM_BASE_URI", default_value = DEFAULT_PROBLEM_BASE_URI)]
    problem_base_uri: String,

    /// Allowed CORS origins (comma-separated); any origin when unset
    #[arg(long, env = "PLANET_API_CORS_ORIGINS", value_delimiter = ',')]
    cors_origins: Option<Vec<String>>,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "planet_api=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn open_repository(args: &ServeArgs) -> anyhow::Result<Arc<dyn PlanetRepository>> {
    match args.storage {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory planet store");
            Ok(Arc::new(InMemoryPlanetRepository::new()))
        }
        StorageBackend::Sqlite => {
            let path = match &args.database {
                Some(path) => path.clone(),
                None => db::Database::default_path()?,
            };
            tracing::info!("Using SQLite planet store at {}", path.display());

            let db = db::Database::open(&path)?;
            db.migrate()?;
            Ok(Arc::new(db))
        }
    }
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let repository = open_repository(&args)?;

    let mut config = ApiConfig::default().with_problem_base_uri(args.problem_base_uri.clone());
    if let Some(origins) = args.cors_origins.clone() {
        config = config.with_cors_origins(origins);
    }

    let app = api::create_router(PlanetService::new(repository), config);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Planet API listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

fn print_planet(planet: &PlanetResponse) {
    println!(
        "{}  {}  {}",
        planet.id,
        planet.name,
        planet.description.as_deref().unwrap_or("-")
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let client = PlanetClient::from_env();

    match cli.command {
        Some(Commands::Serve(args)) => serve(args).await?,
        None => serve(cli.serve).await?,
        Some(Commands::List) => {
            for planet in client.list().await? {
                print_planet(&planet);
            }
        }
        Some(Commands::Get { id }) => print_planet(&client.get(id).await?),
        Some(Commands::Search { name }) => print_planet(&client.search(&name).await?),
        Some(Commands::Create { name, description }) => {
            let planet = client
                .create(&PlanetRequest::new(name, description.as_deref()))
                .await?;
            print_planet(&planet);
        }
        Some(Commands::Update {
            id,
            name,
            description,
        }) => {
            let planet = client
                .update(id, &PlanetRequest::new(name, description.as_deref()))
                .await?;
            print_planet(&planet);
        }
        Some(Commands::Delete { id }) => {
            client.delete(id).await?;
            println!("Deleted planet {}", id);
        }
    }

    Ok(())
}
