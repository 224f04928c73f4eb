//! E-wallet float tracker.
//!
//! Tracks GCash and PayMaya agent cash-in/cash-out transactions and JuanPay
//! daily float balances. Records are read from the shop's backend service,
//! then filtered, paginated and summed into the overview and per-provider
//! screens, which this library serves as HTML pages.
//!
//! The calculations live in [aggregation], [filter], [date_range] and
//! [pagination] and are pure functions over record slices.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

pub mod aggregation;
mod app_state;
pub mod date_range;
mod endpoints;
pub mod filter;
pub mod format;
mod html;
mod internal_server_error;
pub mod iso_date;
mod juanpay_page;
mod logging;
mod navigation;
mod not_found;
mod overview;
pub mod pagination;
mod query;
pub mod record;
mod routing;
pub mod source;
mod timezone;
mod wallet_page;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use source::{ApiClient, RecordSource, Snapshot};

use crate::{internal_server_error::ErrorPage, not_found::get_404_not_found_response};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
///
/// None of these come from the calculations themselves, which treat
/// malformed numbers as zero. They are all about getting records in the
/// first place.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The backend could not be reached or answered with an error status.
    #[error("could not fetch records: {0}")]
    FetchFailed(String),

    /// A record collection was not a JSON array.
    #[error("could not read records: {0}")]
    InvalidSnapshot(String),

    /// A snapshot file exists but could not be read.
    #[error("could not read snapshot file: {0}")]
    SnapshotIo(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::FetchFailed(_) | Error::InvalidSnapshot(_) => {
                tracing::error!("Could not load records: {self}");
                ErrorPage {
                    status: StatusCode::BAD_GATEWAY,
                    description: "Could not load records",
                    fix: "Check that the backend service is running, then refresh the page.",
                }
                .into_response()
            }
            Error::InvalidTimezone(ref timezone) => {
                tracing::error!("Invalid timezone {timezone}");
                ErrorPage {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    description: "Invalid Timezone Settings",
                    fix: &format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                        ensure the timezone has been set to valid, canonical timezone string"
                    ),
                }
                .into_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                ErrorPage::default().into_response()
            }
        }
    }
}
