use reqwest::Url;

/// Extracts the ad identifier from a pasted Jinka listing URL.
///
/// Listing links carry the id in the `ad` query parameter, e.g.
/// `https://www.jinka.fr/alert_result?token=…&ad=84216954`. Returns `None`
/// when the input is not an absolute URL or has no non-empty `ad` parameter.
#[must_use]
pub fn extract_ad_id_from_url(raw: &str) -> Option<String> {
    let url = Url::parse(raw.trim()).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "ad")
        .map(|(_, value)| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
