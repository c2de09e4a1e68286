//! Hosted-page URL builders.
//!
//! Pure string construction, no network calls. Two encoding regimes apply,
//! matching what the hosted pages accept: path segments are
//! percent-encoded (a space becomes `%20`), while query-string values are
//! appended literally as given by the caller.

use url::Url;

use crate::config::DEFAULT_HOST;

fn hosted_root() -> Url {
    Url::parse(&format!("https://{DEFAULT_HOST}/")).expect("hosted root URL is valid")
}

/// URL of the hosted subscribe page for a subscriber and plan.
///
/// The screen name rides along as the final path segment; when omitted the
/// segment is empty, leaving a trailing slash.
///
/// # Examples
///
/// ```
/// use subrail_client::urls::subscribe_url;
///
/// assert_eq!(
///     subscribe_url("mysite", "joe", 1, Some("Joe Bob")),
///     "https://subs.subrail.com/mysite/subscribers/joe/subscribe/1/Joe%20Bob"
/// );
/// assert_eq!(
///     subscribe_url("mysite", "joe", 1, None),
///     "https://subs.subrail.com/mysite/subscribers/joe/subscribe/1/"
/// );
/// ```
#[must_use]
pub fn subscribe_url(
    site_name: &str,
    subscriber_id: &str,
    plan_id: i64,
    screen_name: Option<&str>,
) -> String {
    let mut url = hosted_root();
    {
        let mut segments = url.path_segments_mut().expect("https URL can be a base");
        segments
            .push(site_name)
            .push("subscribers")
            .push(subscriber_id)
            .push("subscribe")
            .push(&plan_id.to_string())
            .push(screen_name.unwrap_or(""));
    }
    url.to_string()
}

/// URL of the hosted subscribe page with pre-filled form fields.
///
/// `params` become a query string in the given order; omitted fields are
/// simply not present (never rendered as empty pairs). Values are appended
/// literally, not percent-encoded.
#[must_use]
pub fn subscribe_url_with_params(
    site_name: &str,
    subscriber_id: &str,
    plan_id: i64,
    params: &[(&str, &str)],
) -> String {
    let mut url = hosted_root();
    {
        let mut segments = url.path_segments_mut().expect("https URL can be a base");
        segments
            .push(site_name)
            .push("subscribers")
            .push(subscriber_id)
            .push("subscribe")
            .push(&plan_id.to_string());
    }
    let mut out = url.to_string();
    for (i, (key, value)) in params.iter().enumerate() {
        out.push(if i == 0 { '?' } else { '&' });
        out.push_str(key);
        out.push('=');
        out.push_str(value);
    }
    out
}

/// URL of the hosted edit-subscriber page, addressed by the subscriber's
/// token (not the customer id).
#[must_use]
pub fn edit_subscriber_url(site_name: &str, token: &str, return_url: Option<&str>) -> String {
    let mut url = hosted_root();
    {
        let mut segments = url.path_segments_mut().expect("https URL can be a base");
        segments.push(site_name).push("subscriber_accounts").push(token);
    }
    let mut out = url.to_string();
    if let Some(return_url) = return_url {
        out.push_str("?return_url=");
        out.push_str(return_url);
    }
    out
}
