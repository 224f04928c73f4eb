use std::sync::Arc;

use crate::{
    AppState,
    iso_date::IsoDate,
    pagination::PaginationConfig,
    record::{BeginningEntry, ChargeMop, JuanPayRecord, TransactionType, WalletRecord},
    source::{RecordSource, Snapshot},
};

pub(crate) fn wallet_record(
    id: &str,
    date: &str,
    transaction_type: &str,
    amount: f64,
    service_charge: f64,
) -> WalletRecord {
    WalletRecord {
        id: id.to_owned(),
        date: IsoDate::normalize(date),
        amount,
        service_charge,
        transaction_type: TransactionType::from(transaction_type.to_owned()),
        charge_mop: ChargeMop::Cash,
        reference_number: format!("REF-{id}"),
    }
}

pub(crate) fn juanpay_record(
    id: &str,
    date: &str,
    beginnings: &[f64],
    ending: f64,
    sales: f64,
) -> JuanPayRecord {
    JuanPayRecord {
        id: id.to_owned(),
        date: IsoDate::normalize(date),
        beginnings: beginnings
            .iter()
            .map(|&amount| BeginningEntry { amount })
            .collect(),
        ending,
        sales,
    }
}

pub(crate) fn test_state(snapshot: Snapshot) -> AppState {
    AppState::new(
        RecordSource::Memory(Arc::new(snapshot)),
        "Asia/Manila",
        PaginationConfig::default(),
    )
    .expect("Could not create app state")
}
