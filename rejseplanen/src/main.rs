use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use rejseplanen::api::{
    ApiError, DEFAULT_BASE_URL, MockTransport, NearbyQuery, RejseplanenClient,
    RejseplanenConfig, Transport,
};
use rejseplanen::domain::{BoardType, Coordinate, ProductCategory, Stop};

/// Query the Rejseplanen journey planner from the command line.
#[derive(Parser)]
#[command(name = "rejseplanen", version, about, long_about = None)]
struct Cli {
    /// API base URL
    #[arg(long, env = "REJSEPLANEN_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30, global = true)]
    timeout: u64,

    /// Serve responses from `<endpoint>.json` files in this directory instead of the network
    #[arg(long, env = "REJSEPLANEN_MOCK_DIR", global = true)]
    mock_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for stops, addresses and points of interest
    Location {
        /// Search text, e.g. "Aarhus H"
        query: String,
    },

    /// List stops near a coordinate
    Nearby {
        latitude: f64,
        longitude: f64,

        /// Search radius in metres
        #[arg(long)]
        radius: Option<u32>,

        /// Maximum number of stops
        #[arg(long)]
        count: Option<u32>,

        /// Only stops served by these products
        #[arg(long, value_enum)]
        products: Option<ProductGroup>,
    },

    /// Show the departure board of a stop
    Departures {
        /// Stop id as returned by `location` or `nearby`
        stop_id: String,

        /// Stop name to show in the board header
        #[arg(long, default_value = "")]
        name: String,

        #[arg(long, value_enum, default_value_t = Board::All)]
        board: Board,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ProductGroup {
    All,
    Trains,
    Busses,
    Metros,
    Ferries,
}

impl ProductGroup {
    fn products(self) -> Vec<ProductCategory> {
        match self {
            ProductGroup::All => [
                ProductCategory::TRAINS,
                ProductCategory::BUSSES,
                ProductCategory::METROS,
                ProductCategory::FERRIES,
            ]
            .concat(),
            ProductGroup::Trains => ProductCategory::TRAINS.to_vec(),
            ProductGroup::Busses => ProductCategory::BUSSES.to_vec(),
            ProductGroup::Metros => ProductCategory::METROS.to_vec(),
            ProductGroup::Ferries => ProductCategory::FERRIES.to_vec(),
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Board {
    All,
    Trains,
    Busses,
    Metros,
}

impl From<Board> for BoardType {
    fn from(board: Board) -> Self {
        match board {
            Board::All => BoardType::All,
            Board::Trains => BoardType::Trains,
            Board::Busses => BoardType::Busses,
            Board::Metros => BoardType::Metros,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match dispatch(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Request failed");
            ExitCode::FAILURE
        }
    }
}

async fn dispatch(cli: Cli) -> Result<(), ApiError> {
    if let Some(dir) = &cli.mock_dir {
        let mock = MockTransport::from_dir(dir)?;
        tracing::info!(endpoints = mock.len(), dir = %dir.display(), "Serving mock responses");
        let client = RejseplanenClient::with_transport(mock, &cli.base_url)?;
        return run(&client, cli.command).await;
    }

    let config = RejseplanenConfig::new()
        .with_base_url(&cli.base_url)
        .with_timeout(cli.timeout);
    let client = RejseplanenClient::new(config)?;
    run(&client, cli.command).await
}

async fn run<T: Transport>(client: &RejseplanenClient<T>, command: Commands) -> Result<(), ApiError> {
    match command {
        Commands::Location { query } => {
            let result = client.location(&query).await?;
            if result.is_empty() {
                println!("No matches for {query:?}");
            }
            for place in result.into_places() {
                println!("{place}");
            }
        }
        Commands::Nearby {
            latitude,
            longitude,
            radius,
            count,
            products,
        } => {
            let mut query = NearbyQuery::new(Coordinate::new(latitude, longitude));
            if let Some(radius) = radius {
                query = query.with_max_radius(radius);
            }
            if let Some(count) = count {
                query = query.with_max_count(count);
            }
            if let Some(group) = products {
                query = query.with_products(&group.products());
            }

            let stops = client.stops_nearby(&query).await?;
            if stops.is_empty() {
                println!("No stops nearby");
            }
            for stop in stops {
                println!("{stop}");
            }
        }
        Commands::Departures {
            stop_id,
            name,
            board,
        } => {
            // Coordinates are not needed to request a board
            let stop = Stop::new(stop_id, name, 0.0, 0.0);
            let mut board = client.departure_board(board.into(), &stop).await?;
            board.dedup();

            println!("Departures from {} ({})", board.stop().name(), board.stop().id());
            if board.departures().is_empty() {
                println!("  none");
            }
            for departure in board.departures() {
                println!("  {departure}");
            }
        }
    }

    Ok(())
}
