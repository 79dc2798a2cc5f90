//! LocalGov CLI
//!
//! Command-line client for the resident portal:
//! - Sign in, sign up and sign out
//! - Show the dashboard tiles and category details
//! - Export located records as GeoJSON

use anyhow::{bail, Context};
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use localgov::auth::{self, Access, DenyReason, FileSessionStore, RouteGuard};
use localgov::config::{self, Config, LoggingConfig};
use localgov::dashboard::{Dashboard, DashboardLoader, DashboardState, Header, FALLBACK_NAME};
use localgov::portal::{AnimalAction, Category, WasteKind};
use localgov::render::{self, ViewOptions};
use localgov::HttpClient;

const LOGIN_HINT: &str = "Log in with: localgov login --email <email> --password <password>";

#[derive(Parser)]
#[command(name = "localgov")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Resident portal for council services")]
#[command(long_about = "LocalGov shows your council records in one place.\nRates, water usage, development applications, waste collection and more.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Create an account
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Forget the saved session
    Logout,

    /// Show who is signed in
    Whoami,

    /// Show the dashboard
    Dashboard {
        /// Category to show details for (e.g. rates, "public health")
        #[arg(long)]
        category: Option<Category>,
        /// Animal service (adopt, surrender, lost, support)
        #[arg(long)]
        animal_action: Option<AnimalAction>,
        /// Waste service (garbage, recycling, greenwaste, repurpose)
        #[arg(long)]
        waste_kind: Option<WasteKind>,
    },

    /// Located records of a category as GeoJSON
    Map {
        /// Category to plot (rates, development)
        category: Category,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    init_logging(&config.logging);

    let json_output = cli.format == "json";
    let store = FileSessionStore::new(config.session_path());
    let api = HttpClient::new(config.client_config())
        .with_context(|| format!("Cannot use API URL {}", config.api.base_url))?;

    match cli.command {
        Commands::Login { email, password } => {
            let session = auth::login(&api, &store, &email, &password).await?;
            let name = session.user_name.as_deref().unwrap_or(FALLBACK_NAME);

            if json_output {
                println!("{}", json!({ "signed_in": true, "user_name": name }));
            } else {
                println!("Logged in as {}", name);
            }
        }

        Commands::Signup {
            name,
            email,
            password,
        } => {
            let done = auth::register(&api, &store, &name, &email, &password).await?;

            if json_output {
                println!(
                    "{}",
                    json!({ "message": done.message, "signed_in": done.session.is_some() })
                );
            } else {
                println!("{}", done.message);
                if let Some(session) = &done.session {
                    println!(
                        "Signed in as {}",
                        session.user_name.as_deref().unwrap_or(FALLBACK_NAME)
                    );
                }
            }
        }

        Commands::Logout => {
            auth::logout(&store)?;
            println!("Logged out");
        }

        Commands::Whoami => {
            let (session, claims) = match RouteGuard::check(&store, Utc::now()) {
                Access::Granted { session, claims } => (session, claims),
                Access::Denied(reason) => bail!(denied(reason)),
            };
            let header = Header::from_session(&session);

            if json_output {
                let body = json!({
                    "claims": claims,
                    "header": {
                        "name": header.name,
                        "council_name": header.council_name,
                        "council_logo_url": header.council_logo_url,
                    },
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                let time = |t: Option<chrono::DateTime<Utc>>| {
                    t.map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                        .unwrap_or_else(|| "-".to_string())
                };
                println!("{}", render::render_header(&header));
                println!("{}", "-".repeat(60));
                println!("{:<20} {}", "User ID", claims.user_id().unwrap_or_else(|| "-".into()));
                println!("{:<20} {}", "Name", claims.name.as_deref().unwrap_or("-"));
                println!("{:<20} {}", "Issued", time(claims.issued_at()));
                println!("{:<20} {}", "Expires", time(claims.expires_at()));
                println!("{:<20} {}", "Session file", store.path().display());
            }
        }

        Commands::Dashboard {
            category,
            animal_action,
            waste_kind,
        } => {
            let dashboard = load_dashboard(&api, &store).await?;

            if json_output {
                let body = match category {
                    Some(c) => {
                        let mut only = serde_json::Map::new();
                        only.insert(c.name().to_string(), json!(dashboard.data.items(c)));
                        serde_json::Value::Object(only)
                    }
                    None => serde_json::to_value(&dashboard.data)?,
                };
                println!("{}", serde_json::to_string_pretty(&body)?);
                return Ok(());
            }

            println!("{}", render::render_header(&dashboard.header));
            println!();
            println!("{}", render::render_tiles(&dashboard.tiles(category)));

            match category {
                Some(c) => {
                    let options = ViewOptions {
                        animal_action,
                        waste_kind,
                        map: config.map.card_settings(),
                    };
                    println!();
                    println!("{}", render::render_view(c, &dashboard.view(c), options));
                }
                None => {
                    println!();
                    println!("Show details with: localgov dashboard --category <name>");
                }
            }
        }

        Commands::Map { category } => {
            let dashboard = load_dashboard(&api, &store).await?;
            let markers = render::map_markers(
                &dashboard.view(category),
                &config.map.tile_url,
                &config.map.card_settings(),
            );

            if json_output {
                let geojson = render::markers_geojson(&markers);
                println!("{}", serde_json::to_string_pretty(&geojson)?);
            } else {
                println!("{}", render::render_markers(&markers));
                if markers.is_empty() {
                    println!(
                        "Default view: {} (zoom {})",
                        config.map.default_center(),
                        config.map.default_zoom
                    );
                }
            }
        }

        Commands::Config { output } => write_config(output.as_ref())?,
    }

    Ok(())
}

/// Guard check, then the same two requests the web dashboard makes
async fn load_dashboard(api: &HttpClient, store: &FileSessionStore) -> anyhow::Result<Dashboard> {
    if let Access::Denied(reason) = RouteGuard::check(store, Utc::now()) {
        bail!(denied(reason));
    }

    match DashboardLoader::new(api, store).load().await {
        DashboardState::Loaded(dashboard) => Ok(dashboard),
        DashboardState::SignedOut => bail!(denied(DenyReason::NoToken)),
        state @ DashboardState::SessionExpired => {
            bail!("{}\n{}", state.message().unwrap_or_default(), LOGIN_HINT)
        }
        DashboardState::Failed(message) => bail!(message),
    }
}

fn denied(reason: DenyReason) -> String {
    format!("{}\n{}", reason.message(), LOGIN_HINT)
}

fn write_config(output: Option<&PathBuf>) -> anyhow::Result<()> {
    let config = config::generate_default_config();

    match output {
        Some(path) => {
            // Create parent directory if needed
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config)?;
            println!("Config written to {:?}", path);
        }
        None => {
            print!("{}", config);
        }
    }
    Ok(())
}

/// Logs go to stderr so `--format json` output stays parseable
fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("localgov={}", logging.level)));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
