//! Cash-in/cash-out totals over e-wallet records.
//!
//! Provides the sums behind the summary cards: per provider and per day,
//! across providers over a date range, and the JuanPay balance
//! reconciliation.
//!
//! Sums use plain `f64` addition. Values that are not finite count as zero so
//! that one malformed record cannot poison a total.

use std::{collections::BTreeMap, ops::Add};

use crate::{
    date_range::{DateRange, matches_date},
    iso_date::IsoDate,
    record::{JuanPayRecord, TransactionType, WalletRecord},
};

/// Cash-in and cash-out totals for a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DailyStats {
    /// The sum of cash-in amounts.
    pub cash_in: f64,
    /// The sum of service charges on cash-ins.
    pub cash_in_charges: f64,
    /// The sum of cash-out amounts.
    pub cash_out: f64,
    /// The sum of service charges on cash-outs.
    pub cash_out_charges: f64,
    /// The number of cash-in transactions.
    pub cash_in_count: usize,
    /// The number of cash-out transactions.
    pub cash_out_count: usize,
}

impl DailyStats {
    /// The service charges collected on both cash-ins and cash-outs.
    pub fn total_charges(&self) -> f64 {
        self.cash_in_charges + self.cash_out_charges
    }

    fn record(&mut self, transaction: &WalletRecord) {
        let amount = finite_or_zero(transaction.amount);
        let charge = finite_or_zero(transaction.service_charge);

        match transaction.transaction_type {
            TransactionType::CashIn => {
                self.cash_in += amount;
                self.cash_in_charges += charge;
                self.cash_in_count += 1;
            }
            TransactionType::CashOut => {
                self.cash_out += amount;
                self.cash_out_charges += charge;
                self.cash_out_count += 1;
            }
            TransactionType::Other(ref label) => {
                tracing::debug!(
                    "transaction {} has unknown type {label:?}, leaving it out of totals",
                    transaction.id
                );
            }
        }
    }
}

impl Add for DailyStats {
    type Output = DailyStats;

    fn add(self, rhs: Self) -> Self::Output {
        DailyStats {
            cash_in: self.cash_in + rhs.cash_in,
            cash_in_charges: self.cash_in_charges + rhs.cash_in_charges,
            cash_out: self.cash_out + rhs.cash_out,
            cash_out_charges: self.cash_out_charges + rhs.cash_out_charges,
            cash_in_count: self.cash_in_count + rhs.cash_in_count,
            cash_out_count: self.cash_out_count + rhs.cash_out_count,
        }
    }
}

/// The totals shown on the overview's date-range cards.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProviderTotals {
    /// The sum of cash-in amounts.
    pub total_cash_in: f64,
    /// The sum of service charges on cash-ins.
    pub total_cash_in_charges: f64,
    /// The sum of cash-out amounts.
    pub total_cash_out: f64,
    /// The sum of service charges on cash-outs.
    pub total_cash_out_charges: f64,
}

impl From<DailyStats> for ProviderTotals {
    fn from(stats: DailyStats) -> Self {
        Self {
            total_cash_in: stats.cash_in,
            total_cash_in_charges: stats.cash_in_charges,
            total_cash_out: stats.cash_out,
            total_cash_out_charges: stats.cash_out_charges,
        }
    }
}

/// Sum amounts and service charges by transaction type.
///
/// Transactions that are neither cash-in nor cash-out are left out.
pub fn aggregate_by_type_and_charge<'a>(
    records: impl IntoIterator<Item = &'a WalletRecord>,
) -> DailyStats {
    let mut stats = DailyStats::default();

    for record in records {
        stats.record(record);
    }

    stats
}

/// Combined GCash and PayMaya totals over `range`.
///
/// A reversed range is swapped before filtering. JuanPay reconciliations do
/// not contribute to these totals.
pub fn aggregate_across_providers(
    gcash: &[WalletRecord],
    paymaya: &[WalletRecord],
    range: &DateRange,
) -> ProviderTotals {
    let range = range.normalized();
    let in_range = |records: &[WalletRecord]| {
        aggregate_by_type_and_charge(
            records
                .iter()
                .filter(|record| matches_date(*record, &range)),
        )
    };

    ProviderTotals::from(in_range(gcash) + in_range(paymaya))
}

/// Totals for the transactions dated exactly `date`.
pub fn aggregate_for_exact_date<'a>(
    records: impl IntoIterator<Item = &'a WalletRecord>,
    date: &IsoDate,
) -> DailyStats {
    aggregate_by_type_and_charge(records.into_iter().filter(|record| &record.date == date))
}

/// Totals for each day that has at least one transaction.
pub fn daily_stats_by_date<'a>(
    records: impl IntoIterator<Item = &'a WalletRecord>,
) -> BTreeMap<IsoDate, DailyStats> {
    let mut days: BTreeMap<IsoDate, DailyStats> = BTreeMap::new();

    for record in records {
        days.entry(record.date.clone()).or_default().record(record);
    }

    days
}

/// The beginning balance of a JuanPay reconciliation, summed over all entries.
pub fn sum_beginnings(record: &JuanPayRecord) -> f64 {
    record
        .beginnings
        .iter()
        .map(|entry| finite_or_zero(entry.amount))
        .sum()
}

/// The sales implied by a drop from `total_beginning` to `ending`.
///
/// A balance that grew over the day implies no sales rather than negative
/// sales.
pub fn derive_sales(total_beginning: f64, ending: f64) -> f64 {
    (finite_or_zero(total_beginning) - finite_or_zero(ending)).max(0.0)
}

/// Totals over a set of JuanPay reconciliations.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JuanPaySummary {
    /// The sum of beginning balances.
    pub total_beginning: f64,
    /// The sum of ending balances.
    pub total_ending: f64,
    /// The sum of sales as persisted.
    pub total_sales: f64,
}

/// Sum beginning balances, ending balances and persisted sales.
pub fn summarize_juanpay<'a>(
    records: impl IntoIterator<Item = &'a JuanPayRecord>,
) -> JuanPaySummary {
    records
        .into_iter()
        .fold(JuanPaySummary::default(), |summary, record| JuanPaySummary {
            total_beginning: summary.total_beginning + sum_beginnings(record),
            total_ending: summary.total_ending + finite_or_zero(record.ending),
            total_sales: summary.total_sales + finite_or_zero(record.sales),
        })
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}
