//! Application router configuration.

use axum::{Router, middleware, response::Redirect, routing::get};

use crate::{
    AppState, endpoints, juanpay_page::get_juanpay_page, logging::logging_middleware,
    not_found::get_404_not_found, overview::get_overview_page,
    wallet_page::{get_gcash_page, get_paymaya_page},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::OVERVIEW_VIEW, get(get_overview_page))
        .route(endpoints::GCASH_VIEW, get(get_gcash_page))
        .route(endpoints::PAYMAYA_VIEW, get(get_paymaya_page))
        .route(endpoints::JUANPAY_VIEW, get(get_juanpay_page))
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

/// The root path '/' redirects to the overview page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::OVERVIEW_VIEW)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use axum::http::StatusCode;
    use axum_test::TestServer;

    use crate::{
        AppState, endpoints,
        pagination::PaginationConfig,
        source::{ApiClient, RecordSource, Snapshot},
        test_utils::{test_state, wallet_record},
    };

    use super::build_router;

    fn test_server(state: AppState) -> TestServer {
        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn root_redirects_to_overview() {
        let server = test_server(test_state(Snapshot::default()));

        let response = server.get(endpoints::ROOT).await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header("location"), endpoints::OVERVIEW_VIEW);
    }

    #[tokio::test]
    async fn serves_every_page() {
        let server = test_server(test_state(Snapshot {
            gcash: vec![wallet_record("g1", "2024-05-01", "Cash-In", 10.0, 1.0)],
            ..Snapshot::default()
        }));

        for endpoint in [
            endpoints::OVERVIEW_VIEW,
            endpoints::GCASH_VIEW,
            endpoints::PAYMAYA_VIEW,
            endpoints::JUANPAY_VIEW,
        ] {
            let response = server.get(endpoint).await;

            response.assert_status_ok();
            assert_eq!(response.header("content-type"), "text/html; charset=utf-8");
        }
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let server = test_server(test_state(Snapshot::default()));

        let response = server.get("/no-such-page").await;

        response.assert_status_not_found();
        assert!(response.text().contains("404"));
    }

    #[tokio::test]
    async fn query_strings_are_filters_not_errors() {
        let server = test_server(test_state(Snapshot::default()));

        server
            .get("/gcash?page=abc&start=not-a-date&search=")
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn unreadable_records_are_a_bad_gateway() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("gcash.json"), "{ broken").unwrap();
        let state = AppState::new(
            RecordSource::Directory(dir.path().to_path_buf()),
            "Asia/Manila",
            PaginationConfig::default(),
        )
        .unwrap();
        let server = test_server(state);

        let response = server.get(endpoints::GCASH_VIEW).await;

        response.assert_status(StatusCode::BAD_GATEWAY);
        assert!(response.text().contains("Could not load records"));
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_bad_gateway() {
        let client = ApiClient::new("http://127.0.0.1:9").unwrap();
        let state = AppState::new(
            RecordSource::Api(client),
            "Asia/Manila",
            PaginationConfig::default(),
        )
        .unwrap();
        let server = test_server(state);

        let response = server.get(endpoints::OVERVIEW_VIEW).await;

        response.assert_status(StatusCode::BAD_GATEWAY);
    }
}
