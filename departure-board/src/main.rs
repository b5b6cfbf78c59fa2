use std::error::Error;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::{error, info};

use departure_board::cache::{CacheConfig, CachedTransitClient};
use departure_board::config::BoardConfig;
use departure_board::domain::{Coordinate, CurrentStation};
use departure_board::nearby::format_distance;
use departure_board::session::Session;
use departure_board::transport::{
    DEFAULT_BASE_URL, MockTransitClient, TransitProvider, TransportClient, TransportConfig,
};
use departure_board::web::{AppState, DepartureResult, create_router};

#[derive(Parser, Debug)]
#[command(name = "departure-board")]
#[command(about = "Find nearby public transport stations and watch their departures.", long_about = None)]
struct Cli {
    /// Base URL of the transport API
    #[arg(long, env = "TRANSPORT_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
    api_url: String,

    /// Serve recorded responses from this directory instead of the live API
    #[arg(long, env = "MOCK_DATA_DIR", global = true)]
    mock_data: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the web server
    Serve {
        /// Address to listen on
        #[arg(long, env = "DEPARTURE_BOARD_ADDR", default_value = "127.0.0.1:3000")]
        addr: SocketAddr,

        /// Directory with the static assets
        #[arg(long, default_value = "static")]
        static_dir: String,
    },

    /// Print a station's departures and keep them fresh
    Watch {
        /// Latitude of your position
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude of your position
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,

        /// Search by station name instead of position
        #[arg(long, conflicts_with_all = ["lat", "lon"], required_unless_present = "lat")]
        query: Option<String>,

        /// Search radius in meters
        #[arg(long)]
        radius: Option<f64>,

        /// Which result to watch (0 is the nearest or best match)
        #[arg(long, default_value_t = 0)]
        pick: usize,

        /// Number of departures to show
        #[arg(long)]
        limit: Option<u8>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "departure_board=info,tower_http=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match start(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "exiting");
            ExitCode::FAILURE
        }
    }
}

async fn start(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = BoardConfig::default();

    match cli.mock_data {
        Some(dir) => {
            let mock = MockTransitClient::new(&dir)?;
            info!(dir = %dir.display(), boards = ?mock.available_boards(), "using mock data");
            run(mock, config, cli.command).await
        }
        None => {
            let client = TransportClient::new(TransportConfig::new().with_base_url(cli.api_url))?;
            info!(base_url = client.base_url(), "using live transport API");
            let cached = CachedTransitClient::new(client, &CacheConfig::default());
            run(cached, config, cli.command).await
        }
    }
}

async fn run<P: TransitProvider + 'static>(
    provider: P,
    config: BoardConfig,
    command: Command,
) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Serve { addr, static_dir } => {
            let app = create_router(AppState::new(provider, config), &static_dir);

            let listener = tokio::net::TcpListener::bind(addr).await?;
            info!("Departure board listening on http://{addr}");

            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
            Ok(())
        }
        Command::Watch {
            lat,
            lon,
            query,
            radius,
            pick,
            limit,
        } => {
            let radius = radius.unwrap_or(config.default_radius_meters);
            if !config.accepts_radius(radius) {
                return Err(format!(
                    "radius must be between 0 and {} meters",
                    config.max_radius_meters
                )
                .into());
            }
            let limit = limit
                .unwrap_or(config.board_limit)
                .clamp(1, config.max_board_limit);

            let mut session = Session::new(radius)?;
            match (query, lat, lon) {
                (Some(query), _, _) => {
                    let query = query.trim();
                    if query.chars().count() < config.min_query_chars {
                        return Err(format!(
                            "Please enter at least {} characters",
                            config.min_query_chars
                        )
                        .into());
                    }
                    select_by_name(&mut session, &provider, query, pick).await?
                }
                (None, Some(lat), Some(lon)) => {
                    select_nearby(&mut session, &provider, Coordinate::new(lat, lon)?, pick).await?
                }
                _ => return Err("give either --query or --lat and --lon".into()),
            }

            watch(&mut session, &provider, &config, limit).await
        }
    }
}

async fn select_by_name<P: TransitProvider>(
    session: &mut Session,
    provider: &P,
    query: &str,
    pick: usize,
) -> Result<(), Box<dyn Error>> {
    let found = provider.search_stations(query).await?;
    let station = found
        .into_iter()
        .nth(pick)
        .ok_or_else(|| format!("No stations found for \"{}\"", query))?;
    session.select(CurrentStation::unranked(station));
    Ok(())
}

async fn select_nearby<P: TransitProvider>(
    session: &mut Session,
    provider: &P,
    origin: Coordinate,
    pick: usize,
) -> Result<(), Box<dyn Error>> {
    session.locate(origin);
    let nearby = session.search_nearby(provider).await?;
    if nearby.is_empty() {
        return Err("No stations found nearby. Try increasing the radius.".into());
    }

    for (i, ranked) in nearby.iter().enumerate() {
        println!(
            "{:>2}  {:<40} {}",
            i,
            ranked.station().name,
            format_distance(ranked.distance_meters())
        );
    }
    println!();

    session.select_nearby(pick)?;
    Ok(())
}

/// Print the board, then reprint it on every refresh tick until Ctrl-C.
async fn watch<P: TransitProvider>(
    session: &mut Session,
    provider: &P,
    config: &BoardConfig,
    limit: u8,
) -> Result<(), Box<dyn Error>> {
    session.load_departures(provider, limit).await?;
    print_board(session);

    session.start_auto_refresh(config.refresh_interval());

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        let tick = tokio::select! {
            tick = session.next_refresh() => tick,
            _ = &mut ctrl_c => None,
        };
        if tick.is_none() {
            break;
        }

        // A failed reload keeps the previous board on screen
        if session.load_departures(provider, limit).await.is_ok() {
            print_board(session);
        }
    }

    session.change_station();
    Ok(())
}

fn print_board(session: &Session) {
    let Some(current) = session.current() else {
        return;
    };

    match current.distance_meters {
        Some(d) => println!("{} ({})", current.station.name, format_distance(d)),
        None => println!("{}", current.station.name),
    }

    if session.departures().is_empty() {
        println!("  No departures found at this time.");
    }

    let now = Utc::now();
    for departure in session.departures() {
        let row = DepartureResult::from_departure(departure, now);
        println!(
            "  {:<5} {:<40} {:>3} min",
            row.line,
            row.destination,
            row.minutes_display()
        );
    }
    println!("  Last updated: {}", chrono::Local::now().format("%H:%M:%S"));
    println!();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
    }
    info!("shutting down");
}
