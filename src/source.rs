//! Where records come from: the shop's backend service, a directory of JSON
//! snapshots, or an in-memory snapshot.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    Error,
    iso_date::IsoDate,
    record::{Dated, JuanPayRecord, Provider, Record, WalletRecord},
};

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Every record collection at one point in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// GCash transactions.
    pub gcash: Vec<WalletRecord>,
    /// PayMaya transactions.
    pub paymaya: Vec<WalletRecord>,
    /// JuanPay reconciliations.
    pub juanpay: Vec<JuanPayRecord>,
}

impl Snapshot {
    /// The transactions of a wallet provider. JuanPay has none.
    pub fn wallet_records(&self, provider: Provider) -> &[WalletRecord] {
        match provider {
            Provider::GCash => &self.gcash,
            Provider::PayMaya => &self.paymaya,
            Provider::JuanPay => &[],
        }
    }

    /// All records tagged with their provider.
    pub fn records(&self) -> Vec<Record> {
        let wallet = [Provider::GCash, Provider::PayMaya]
            .into_iter()
            .flat_map(|provider| {
                self.wallet_records(provider)
                    .iter()
                    .map(move |record| Record::Wallet(provider, record.clone()))
            });
        let juanpay = self.juanpay.iter().cloned().map(Record::JuanPay);

        wallet.chain(juanpay).collect()
    }

    /// The earliest and latest record dates, ignoring blank dates.
    pub fn date_bounds(&self) -> Option<(IsoDate, IsoDate)> {
        self.records()
            .iter()
            .map(Dated::date)
            .filter(|date| !date.as_str().is_empty())
            .fold(None, |bounds, date| match bounds {
                None => Some((date.clone(), date.clone())),
                Some((first, last)) => Some((first.min(date.clone()), last.max(date.clone()))),
            })
    }
}

/// A client for the backend service's record endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the service at `base_url`, e.g. "http://localhost:3001".
    ///
    /// # Errors
    /// Returns [Error::FetchFailed] if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|error| {
                Error::FetchFailed(format!("could not build HTTP client: {error}"))
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// The URL of a provider's record collection.
    pub fn url_for(&self, provider: Provider) -> String {
        format!("{}{}", self.base_url, provider.api_path())
    }

    /// Fetch a provider's record collection.
    ///
    /// # Errors
    /// Returns [Error::FetchFailed] if the request fails or the service
    /// responds with an error status, and [Error::InvalidSnapshot] if the
    /// body is not a JSON array.
    pub async fn fetch<T: DeserializeOwned>(&self, provider: Provider) -> Result<Vec<T>, Error> {
        let url = self.url_for(provider);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|error| Error::FetchFailed(format!("GET {url}: {error}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::FetchFailed(format!("GET {url} returned {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|error| Error::FetchFailed(format!("GET {url}: {error}")))?;

        parse_collection(provider, &body)
    }
}

/// Where the application reads its records from.
#[derive(Debug, Clone)]
pub enum RecordSource {
    /// The backend service.
    Api(ApiClient),
    /// A directory holding `gcash.json`, `paymaya.json` and `juanpay.json`.
    Directory(PathBuf),
    /// A fixed snapshot.
    Memory(Arc<Snapshot>),
}

impl RecordSource {
    /// Fetch the transactions of a wallet provider.
    ///
    /// JuanPay has no wallet transactions, so asking for them gives an empty list.
    pub async fn fetch_wallet(&self, provider: Provider) -> Result<Vec<WalletRecord>, Error> {
        if provider == Provider::JuanPay {
            return Ok(Vec::new());
        }

        let records = match self {
            Self::Api(client) => client.fetch(provider).await,
            Self::Directory(dir) => read_snapshot_file(dir, provider).await,
            Self::Memory(snapshot) => Ok(snapshot.wallet_records(provider).to_vec()),
        }
        .inspect_err(|error| tracing::error!("Could not fetch {provider} records: {error}"))?;

        tracing::debug!("Fetched {} {provider} records", records.len());

        Ok(records)
    }

    /// Fetch the JuanPay reconciliations.
    pub async fn fetch_juanpay(&self) -> Result<Vec<JuanPayRecord>, Error> {
        let provider = Provider::JuanPay;

        let records = match self {
            Self::Api(client) => client.fetch(provider).await,
            Self::Directory(dir) => read_snapshot_file(dir, provider).await,
            Self::Memory(snapshot) => Ok(snapshot.juanpay.clone()),
        }
        .inspect_err(|error| tracing::error!("Could not fetch {provider} records: {error}"))?;

        tracing::debug!("Fetched {} {provider} records", records.len());

        Ok(records)
    }

    /// Fetch all three collections concurrently.
    pub async fn fetch_snapshot(&self) -> Result<Snapshot, Error> {
        let (gcash, paymaya, juanpay) = tokio::try_join!(
            self.fetch_wallet(Provider::GCash),
            self.fetch_wallet(Provider::PayMaya),
            self.fetch_juanpay(),
        )?;

        Ok(Snapshot {
            gcash,
            paymaya,
            juanpay,
        })
    }
}

async fn read_snapshot_file<T: DeserializeOwned>(
    dir: &Path,
    provider: Provider,
) -> Result<Vec<T>, Error> {
    let path = dir.join(provider.snapshot_file());

    match tokio::fs::read_to_string(&path).await {
        Ok(text) => parse_collection(provider, &text),
        Err(error) if error.kind() == ErrorKind::NotFound => {
            tracing::warn!(
                "No snapshot file for {provider} at {}, using no records",
                path.display()
            );
            Ok(Vec::new())
        }
        Err(error) => Err(Error::SnapshotIo(format!("{}: {error}", path.display()))),
    }
}

/// Parse a JSON array of records, skipping elements that are not records.
fn parse_collection<T: DeserializeOwned>(provider: Provider, text: &str) -> Result<Vec<T>, Error> {
    let values: Vec<Value> = serde_json::from_str(text)
        .map_err(|error| Error::InvalidSnapshot(format!("{provider} records: {error}")))?;

    let records = values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            serde_json::from_value(value)
                .inspect_err(|error| {
                    tracing::warn!("Skipping {provider} record at index {index}: {error}")
                })
                .ok()
        })
        .collect();

    Ok(records)
}

#[cfg(test)]
mod tests {
    use std::{fs, sync::Arc};

    use axum::{Json, Router, http::StatusCode, routing::get};
    use serde_json::json;

    use crate::{
        Error,
        iso_date::IsoDate,
        record::{JuanPayRecord, Provider, Record, TransactionType, WalletRecord},
    };

    use super::{ApiClient, RecordSource, Snapshot, parse_collection};

    fn wallet_record(id: &str, date: &str) -> WalletRecord {
        serde_json::from_value(json!({
            "id": id,
            "date": date,
            "amount": 100,
            "serviceCharge": 2,
            "transactionType": "Cash-In",
        }))
        .unwrap()
    }

    fn juanpay_record(id: &str, date: &str) -> JuanPayRecord {
        serde_json::from_value(json!({
            "id": id,
            "date": date,
            "beginnings": [{ "amount": 500 }],
            "ending": 200,
            "sales": 300,
        }))
        .unwrap()
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });

        format!("http://{addr}")
    }

    #[test]
    fn skips_elements_that_are_not_records() {
        let text = r#"[{"id": "1", "date": "2024-05-01", "amount": "10"}, 42, "junk"]"#;

        let records: Vec<WalletRecord> = parse_collection(Provider::GCash, text).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].amount, 10.0);
    }

    #[test]
    fn rejects_body_that_is_not_an_array() {
        let result: Result<Vec<WalletRecord>, Error> =
            parse_collection(Provider::GCash, r#"{"error": "nope"}"#);

        assert!(matches!(result, Err(Error::InvalidSnapshot(_))));
    }

    #[test]
    fn date_bounds_span_all_providers() {
        let snapshot = Snapshot {
            gcash: vec![wallet_record("1", "2024-05-03")],
            paymaya: vec![wallet_record("2", "2024-04-30"), wallet_record("3", "")],
            juanpay: vec![juanpay_record("4", "2024-05-10")],
        };

        assert_eq!(
            snapshot.date_bounds(),
            Some((IsoDate::normalize("2024-04-30"), IsoDate::normalize("2024-05-10")))
        );
        assert_eq!(Snapshot::default().date_bounds(), None);
    }

    #[test]
    fn records_are_tagged_with_their_provider() {
        let snapshot = Snapshot {
            gcash: vec![wallet_record("1", "2024-05-03")],
            paymaya: vec![wallet_record("2", "2024-05-03")],
            juanpay: vec![juanpay_record("3", "2024-05-03")],
        };

        let records = snapshot.records();

        assert_eq!(records.len(), 3);
        assert!(matches!(
            &records[0],
            Record::Wallet(Provider::GCash, record) if record.id == "1"
        ));
        assert!(matches!(
            &records[1],
            Record::Wallet(Provider::PayMaya, record) if record.id == "2"
        ));
        assert!(matches!(&records[2], Record::JuanPay(record) if record.id == "3"));
    }

    #[tokio::test]
    async fn reads_snapshot_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("gcash.json"),
            r#"[{"_id": "a1", "date": "2024-05-01T08:00:00Z", "amount": 250, "serviceCharge": 5, "transactionType": "Cash-Out"}]"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("juanpay.json"),
            r#"[{"id": "j1", "date": "2024-05-01", "beginnings": [{"amount": "1000"}], "ending": 400}]"#,
        )
        .unwrap();
        let source = RecordSource::Directory(dir.path().to_path_buf());

        let snapshot = source.fetch_snapshot().await.unwrap();

        assert_eq!(snapshot.gcash.len(), 1);
        assert_eq!(snapshot.gcash[0].id, "a1");
        assert_eq!(snapshot.gcash[0].date.as_str(), "2024-05-01");
        assert_eq!(snapshot.gcash[0].transaction_type, TransactionType::CashOut);
        assert!(snapshot.paymaya.is_empty(), "missing file should give no records");
        assert_eq!(snapshot.juanpay.len(), 1);
        assert_eq!(snapshot.juanpay[0].beginnings[0].amount, 1000.0);
    }

    #[tokio::test]
    async fn invalid_snapshot_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("paymaya.json"), "not json").unwrap();
        let source = RecordSource::Directory(dir.path().to_path_buf());

        let result = source.fetch_wallet(Provider::PayMaya).await;

        assert!(matches!(result, Err(Error::InvalidSnapshot(_))));
    }

    #[tokio::test]
    async fn memory_source_returns_its_snapshot() {
        let snapshot = Snapshot {
            gcash: vec![wallet_record("1", "2024-05-03")],
            paymaya: Vec::new(),
            juanpay: vec![juanpay_record("2", "2024-05-03")],
        };
        let source = RecordSource::Memory(Arc::new(snapshot.clone()));

        assert_eq!(source.fetch_snapshot().await.unwrap(), snapshot);
        assert!(source.fetch_wallet(Provider::JuanPay).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn fetches_collections_from_backend() {
        let router = Router::new()
            .route(
                "/api/gcash",
                get(|| async { Json(json!([{"id": "g1", "date": "2024-05-01", "amount": 10}])) }),
            )
            .route("/api/paymaya", get(|| async { Json(json!([])) }))
            .route(
                "/api/juanpay",
                get(|| async { Json(json!([{"id": "j1", "date": "2024-05-01", "ending": 5}])) }),
            );
        let base_url = serve(router).await;
        let source = RecordSource::Api(ApiClient::new(&format!("{base_url}/")).unwrap());

        let snapshot = source.fetch_snapshot().await.unwrap();

        assert_eq!(snapshot.gcash.len(), 1);
        assert_eq!(snapshot.gcash[0].id, "g1");
        assert!(snapshot.paymaya.is_empty());
        assert_eq!(snapshot.juanpay[0].ending, 5.0);
    }

    #[tokio::test]
    async fn error_status_is_fetch_failure() {
        let router = Router::new().route(
            "/api/gcash",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let base_url = serve(router).await;
        let client = ApiClient::new(&base_url).unwrap();

        let result = client.fetch::<WalletRecord>(Provider::GCash).await;

        assert!(matches!(result, Err(Error::FetchFailed(_))), "got {result:?}");
    }
}
