//! The page URIs.

use crate::record::Provider;

/// The root route which redirects to the overview page.
pub const ROOT: &str = "/";
/// The landing page with totals across providers.
pub const OVERVIEW_VIEW: &str = "/overview";
/// The page for GCash transactions.
pub const GCASH_VIEW: &str = "/gcash";
/// The page for PayMaya transactions.
pub const PAYMAYA_VIEW: &str = "/paymaya";
/// The page for JuanPay reconciliations.
pub const JUANPAY_VIEW: &str = "/juanpay";

/// The page that lists a provider's records.
pub fn provider_view(provider: Provider) -> &'static str {
    match provider {
        Provider::GCash => GCASH_VIEW,
        Provider::PayMaya => PAYMAYA_VIEW,
        Provider::JuanPay => JUANPAY_VIEW,
    }
}
