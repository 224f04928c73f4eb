//! Implements a struct that holds the state of the web server.

use crate::{Error, pagination::PaginationConfig, source::RecordSource, timezone::get_local_offset};

/// The state of the web server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Where records are read from on each request.
    pub source: RecordSource,

    /// The local timezone as a canonical timezone name, e.g. "Asia/Manila".
    pub local_timezone: String,

    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,
}

impl AppState {
    /// Create a new [AppState].
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Asia/Manila".
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezone] if `local_timezone` is not a known timezone.
    pub fn new(
        source: RecordSource,
        local_timezone: &str,
        pagination_config: PaginationConfig,
    ) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            return Err(Error::InvalidTimezone(local_timezone.to_owned()));
        }

        Ok(Self {
            source,
            local_timezone: local_timezone.to_owned(),
            pagination_config,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{Error, pagination::PaginationConfig, source::RecordSource};

    use super::AppState;

    #[test]
    fn rejects_unknown_timezone() {
        let source = RecordSource::Memory(Arc::default());

        let result = AppState::new(source, "Not/A_Timezone", PaginationConfig::default());

        assert!(matches!(result, Err(Error::InvalidTimezone(_))));
    }

    #[test]
    fn accepts_canonical_timezone() {
        let source = RecordSource::Memory(Arc::default());

        let state = AppState::new(source, "Asia/Manila", PaginationConfig::default()).unwrap();

        assert_eq!(state.local_timezone, "Asia/Manila");
    }
}
