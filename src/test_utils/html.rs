use axum::{body::Body, response::Response};
use scraper::{ElementRef, Html, Selector};

pub(crate) async fn parse_html_document(response: Response<Body>) -> Html {
    let body = response.into_body();
    let body = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Could not get response body");
    let text = String::from_utf8_lossy(&body).to_string();

    Html::parse_document(&text)
}

#[track_caller]
pub(crate) fn assert_valid_html(html: &Html) {
    assert!(
        html.errors.is_empty(),
        "Got HTML parsing errors: {:?}",
        html.errors
    );
}

/// The trimmed text of every element matching `selector`.
#[track_caller]
pub(crate) fn select_text(html: &Html, selector: &str) -> Vec<String> {
    let selector = Selector::parse(selector).expect("Could not parse selector");

    html.select(&selector).map(element_text).collect()
}

pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_owned()
}

/// The value of the first summary card labelled `label` inside `scope`, e.g. "#selected-day".
#[track_caller]
pub(crate) fn card_value(html: &Html, scope: &str, label: &str) -> String {
    let card_selector =
        Selector::parse(&format!("{scope} div.card")).expect("Could not parse selector");
    let label_selector = Selector::parse("div.card-label").expect("Could not parse selector");
    let value_selector = Selector::parse("div.card-value").expect("Could not parse selector");

    html.select(&card_selector)
        .find(|card| {
            card.select(&label_selector)
                .next()
                .is_some_and(|card_label| element_text(card_label) == label)
        })
        .and_then(|card| card.select(&value_selector).next())
        .map(element_text)
        .unwrap_or_else(|| panic!("No card labelled {label:?} in {scope}"))
}
