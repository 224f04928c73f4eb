//! Defines the page to display when a request fails.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// An error page with a short description and a hint on how to fix it.
pub struct ErrorPage<'a> {
    pub status: StatusCode,
    pub description: &'a str,
    pub fix: &'a str,
}

impl Default for ErrorPage<'_> {
    fn default() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            description: "Sorry, something went wrong.",
            fix: "Try again later or check the server logs",
        }
    }
}

impl ErrorPage<'_> {
    fn into_html(self) -> Html<String> {
        let title = self.status.canonical_reason().unwrap_or("Error");
        let code = self.status.as_str();

        Html(error_view(title, code, self.description, self.fix).into_string())
    }
}

impl IntoResponse for ErrorPage<'_> {
    fn into_response(self) -> Response {
        let status = self.status;

        (status, self.into_html()).into_response()
    }
}
