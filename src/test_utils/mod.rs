#![allow(missing_docs)]

pub(crate) mod html;
pub(crate) mod http;
pub(crate) mod records;

pub(crate) use html::{assert_valid_html, card_value, parse_html_document, select_text};
pub(crate) use http::{assert_content_type, assert_status_ok};
pub(crate) use records::{juanpay_record, test_state, wallet_record};
