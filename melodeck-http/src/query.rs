//! Target address resolution.

use crate::config::ParamValue;

/// Whether `url` is already a full http(s) address
fn is_absolute(url: &str) -> bool {
    url::Url::parse(url).is_ok_and(|parsed| matches!(parsed.scheme(), "http" | "https"))
}

/// Join the base address with a request path and append the query string.
///
/// Absolute paths ignore `base_url`. `Null` params are dropped, and no `?` is
/// added when nothing is left.
pub(crate) fn build_url(base_url: &str, path: &str, params: &[(String, ParamValue)]) -> String {
    let mut url = if is_absolute(path) {
        path.to_string()
    } else {
        format!("{base_url}{path}")
    };

    let query = params
        .iter()
        .filter_map(|(key, value)| {
            value.to_query_value().map(|value| {
                format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(&value)
                )
            })
        })
        .collect::<Vec<_>>()
        .join("&");

    if !query.is_empty() {
        url.push('?');
        url.push_str(&query);
    }
    url
}
