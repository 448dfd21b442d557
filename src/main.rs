use std::net::SocketAddr;
use std::process;

use clap::{Parser, Subcommand};
use comfy_table::{modifiers, presets, ContentArrangement, Table};
use terminal_size::{terminal_size, Width};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use beekeys_proxy::api::{self, load_regions};
use beekeys_proxy::config::{self, DEFAULT_HOST, DEFAULT_PORT};
use beekeys_proxy::models::{AppState, Marker};
use beekeys_proxy::routes::build_router;
use beekeys_proxy::services::{resolve_region, state_details};

fn build_state_from_env(env_file: Option<&str>) -> AppState {
    config::load_env_file(env_file);
    match AppState::from_env() {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(%e, "Failed to create HTTP client");
            eprintln!("{}: {}", yansi::Paint::red("Failed to create HTTP client"), e);
            process::exit(1);
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(%e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(%e, "Failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

async fn start_server(state: AppState, host: &str, port: u16) {
    let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!(%e, "Invalid host/port format");
            eprintln!("{}: {}", yansi::Paint::red("Invalid host/port format"), e);
            process::exit(1);
        }
    };

    if state.proxy_secret.is_none() {
        tracing::warn!("PROXY_SECRET is not set; business submissions will be rejected");
    }
    if state.unsplash_key.is_none() {
        tracing::warn!("UNSPLASH_KEY is not set; region thumbnails will be empty");
    }

    let upstream = state.beekeys_base_url.clone();
    let app = build_router(state);
    tracing::info!(%addr, %upstream, "Starting Beekeys proxy");
    println!(
        "{} {}",
        yansi::Paint::new("Proxy running on").green(),
        yansi::Paint::new(format!("http://{}", addr)).cyan()
    );

    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            let server = axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
                .with_graceful_shutdown(shutdown_signal());
            if let Err(e) = server.await {
                tracing::error!(%e, "Server encountered an error while running");
                eprintln!("{}: {}", yansi::Paint::new("Server error").red(), e);
                process::exit(1);
            }
            println!("{}", yansi::Paint::new("Proxy shut down").dim());
        }
        Err(e) => {
            tracing::error!(%e, "Failed to bind to address; is the port already in use?");
            eprintln!(
                "{}: {}\n{}",
                yansi::Paint::new(format!("Failed to bind to {}", addr)).red(),
                e,
                yansi::Paint::new("Stop whatever is using this port, or pass a different --port.").yellow()
            );
            process::exit(1);
        }
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w.saturating_sub(4));
    }
    table
}

fn print_markers(markers: &[Marker]) {
    if markers.is_empty() {
        println!("(no markers)");
        return;
    }
    let mut table = new_table();
    table.set_header(vec!["ID", "Title", "Lat", "Lng", "Slug"]);
    for m in markers {
        table.add_row(vec![
            m.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
            m.title.clone(),
            format!("{:.5}", m.lat),
            format!("{:.5}", m.lng),
            m.slug.clone().unwrap_or_default(),
        ]);
    }
    println!("\n{table}\n");
}

#[derive(Parser)]
#[command(
    name = "beekeys-proxy",
    author,
    version,
    about = "HTTP proxy in front of the Beekeys WordPress site",
    long_about = r#"beekeys-proxy relays a web frontend's requests to the Beekeys WordPress
site (GeoDirectory, Ninja Forms, UsersWP) and normalizes what comes back.

Configuration is read from environment variables or a `.env` file; pass
`--env-file` to use a different file.

Examples:
  1) Run the proxy:
      beekeys-proxy serve --host 127.0.0.1 --port 10000
  2) Check configuration and upstream reachability:
      beekeys-proxy check-config
  3) See what a frontend slug resolves to:
      beekeys-proxy resolve lagos-state
"#,
    after_help = "Use `beekeys-proxy <subcommand> --help` for subcommand options."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
    /// Disable upstream request/response logging
    #[arg(long, global = true)]
    silent: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the proxy server
    Serve {
        /// Host to bind to
        #[arg(long, env = "HOST", default_value_t = String::from(DEFAULT_HOST))]
        host: String,
        /// Port to bind to
        #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Path to .env file
        #[arg(long)]
        env_file: Option<String>,
    },
    #[command(about = "Validate configuration and ensure upstream connectivity.", long_about = "Check the environment for malformed values, then fetch the region list from the configured Beekeys site to confirm it is reachable.")]
    CheckConfig {
        #[arg(long)]
        env_file: Option<String>,
    },
    /// List upstream regions
    Regions {
        #[arg(long)]
        env_file: Option<String>,
    },
    #[command(about = "Resolve a frontend slug to a region", long_about = "Show the region a slug such as `lagos-state` or `fct-abuja` resolves to, consulting the upstream only when the static map has no entry.")]
    Resolve {
        slug: String,
        #[arg(long)]
        env_file: Option<String>,
    },
    #[command(about = "Show merged markers for a region", long_about = "Run the state details pipeline for a slug: EMS markers and listings, normalized and merged.")]
    Markers {
        slug: String,
        #[arg(long)]
        env_file: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    // `.env` may set HOST/PORT, which clap reads from the environment
    config::load_env_file(None);
    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }
    if cli.silent {
        api::client::set_silent(true);
    }

    let Some(command) = cli.command else {
        let host = config::get_host();
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let state = build_state_from_env(None);
        start_server(state, &host, port).await;
        return;
    };

    match command {
        Commands::Serve { host, port, env_file } => {
            let state = build_state_from_env(env_file.as_deref());
            start_server(state, &host, port).await;
        }
        Commands::CheckConfig { env_file } => {
            let state = build_state_from_env(env_file.as_deref());
            let problems = config::validate();
            for p in &problems {
                eprintln!("{}", yansi::Paint::new(p.to_string()).red());
            }
            if state.proxy_secret.is_none() {
                eprintln!("{}", yansi::Paint::new("PROXY_SECRET is not set").yellow());
            }
            if state.unsplash_key.is_none() {
                eprintln!("{}", yansi::Paint::new("UNSPLASH_KEY is not set").yellow());
            }
            if state.wp_api_url.is_none() {
                eprintln!("{}", yansi::Paint::new("WP_API_URL is not set; /upload-media will fail").yellow());
            }
            if !problems.is_empty() {
                process::exit(1);
            }
            match load_regions(&state).await {
                Ok(regions) => {
                    println!(
                        "{}",
                        yansi::Paint::new(format!("Configuration looks valid ({} regions returned)", regions.len())).green()
                    );
                }
                Err(e) => {
                    eprintln!("{}: {}", yansi::Paint::new("Upstream check failed").red(), e);
                    process::exit(1);
                }
            }
        }
        Commands::Regions { env_file } => {
            let state = build_state_from_env(env_file.as_deref());
            match load_regions(&state).await {
                Ok(regions) => {
                    let mut table = new_table();
                    table.set_header(vec!["ID", "Name", "Slug"]);
                    for r in &regions {
                        table.add_row(vec![
                            r.id.map(|id| id.to_string()).unwrap_or_default(),
                            r.name.clone(),
                            r.slug.clone(),
                        ]);
                    }
                    println!("\n{table}\n");
                }
                Err(e) => {
                    eprintln!("{}: {}", yansi::Paint::new("Failed to fetch regions").red(), e);
                    process::exit(1);
                }
            }
        }
        Commands::Resolve { slug, env_file } => {
            let state = build_state_from_env(env_file.as_deref());
            match resolve_region(&state, &slug).await {
                Some(region) => {
                    let mut table = new_table();
                    table.set_header(vec!["Field", "Value"]);
                    table.add_row(vec!["id".to_string(), region.id.map(|id| id.to_string()).unwrap_or_else(|| "-".into())]);
                    table.add_row(vec!["name".to_string(), region.name]);
                    table.add_row(vec!["slug".to_string(), region.slug]);
                    println!("\n{table}\n");
                }
                None => {
                    eprintln!("{} '{}'", yansi::Paint::new("Region not found for").red(), slug);
                    process::exit(1);
                }
            }
        }
        Commands::Markers { slug, env_file } => {
            let state = build_state_from_env(env_file.as_deref());
            match state_details(&state, &slug).await {
                Ok(details) => {
                    println!(
                        "{} {}",
                        yansi::Paint::new("Region:").bold(),
                        yansi::Paint::new(&details.region.name).cyan()
                    );
                    print_markers(&details.markers);
                }
                Err(e) => {
                    eprintln!("{}: '{}'", yansi::Paint::new(e.to_string()).red(), slug);
                    process::exit(1);
                }
            }
        }
    }
}
