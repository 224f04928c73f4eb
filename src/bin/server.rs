use std::{
    fs::OpenOptions,
    net::SocketAddr,
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Arc,
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use ewallet_tracker::{
    ApiClient, AppState, RecordSource, build_router, graceful_shutdown,
    pagination::PaginationConfig,
};

/// The web server for the e-wallet tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Base URL of the backend service that serves the record collections.
    #[arg(long, default_value = "http://localhost:3001")]
    api_url: String,

    /// Read records from `gcash.json`, `paymaya.json` and `juanpay.json` in
    /// this directory instead of the backend service.
    #[arg(long)]
    snapshot_dir: Option<PathBuf>,

    /// The port to serve the pages from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// The canonical name of the shop's timezone, used for "today".
    #[arg(long, default_value = "Asia/Manila")]
    timezone: String,

    /// The number of records to show per page.
    #[arg(long, default_value_t = 10)]
    page_size: u64,

    /// File path for the debug log.
    #[arg(long, default_value = "debug.log")]
    log_path: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    setup_logging(&args.log_path);

    let source = match args.snapshot_dir {
        Some(dir) => {
            tracing::info!("Reading records from {}", dir.display());
            RecordSource::Directory(dir)
        }
        None => match ApiClient::new(&args.api_url) {
            Ok(client) => {
                tracing::info!("Reading records from {}", args.api_url);
                RecordSource::Api(client)
            }
            Err(error) => {
                tracing::error!("Could not create the backend client: {error}");
                return ExitCode::FAILURE;
            }
        },
    };

    let pagination_config = PaginationConfig {
        page_size: args.page_size.max(1),
        ..PaginationConfig::default()
    };

    let app_state = match AppState::new(source, &args.timezone, pagination_config) {
        Ok(state) => state,
        Err(error) => {
            tracing::error!("Could not start the server: {error}");
            return ExitCode::FAILURE;
        }
    };

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(app_state));

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    tracing::info!("HTTP server listening on http://{}", addr);
    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("Server error: {error}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn setup_logging(log_path: &Path) {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .expect("Could not create log file");

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(
            stdout_log
                .with_filter(filter::LevelFilter::INFO)
                .and_then(debug_log)
                .with_filter(filter::LevelFilter::DEBUG),
        )
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but we're doing our specific
        // logging of errors so disable that
        .on_failure(());

    router.layer(tracing_layer)
}
