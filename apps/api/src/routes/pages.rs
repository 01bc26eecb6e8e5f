//! Presentational pages. `/result` shows whatever the query string carries;
//! it is not a source of truth and performs no re-validation.

use axum::{extract::Query, response::Html};
use serde::Deserialize;

const INDEX_HTML: &str = include_str!("../../templates/index.html");
const RESULT_HTML: &str = include_str!("../../templates/result.html");

#[derive(Debug, Default, Deserialize)]
pub struct ResultQuery {
    #[serde(default)]
    pub personality: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub recommended_jobs: String,
}

/// GET /
pub async fn landing_page() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /result
pub async fn result_page(Query(query): Query<ResultQuery>) -> Html<String> {
    Html(render_result(&query))
}

/// Fills `{{name}}` placeholders in a single pass over the template, so a
/// substituted value is never scanned for placeholders itself.
fn render_result(query: &ResultQuery) -> String {
    let mut html = String::with_capacity(RESULT_HTML.len());
    let mut rest = RESULT_HTML;
    while let Some(start) = rest.find("{{") {
        html.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            rest = &rest[start..];
            break;
        };
        let value = match &after[..end] {
            "personality" => Some(&query.personality),
            "description" => Some(&query.description),
            "recommended_jobs" => Some(&query.recommended_jobs),
            _ => None,
        };
        match value {
            Some(value) => html.push_str(&escape_html(value)),
            None => html.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }
    html.push_str(rest);
    html
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
