use crate::UrlError;
use url::Url;

/// Path marker that identifies a link to a case page
pub const CASE_PATH_MARKER: &str = "/cases/";

/// Path prefix under which playlists live on the source site
const PLAYLIST_PATH_PREFIX: &str = "playlists/";

/// Resolves a playlist argument into a full playlist URL
///
/// The argument may be either a full URL (`https://radiopaedia.org/playlists/85715`)
/// or a bare playlist identifier (`85715`), which is resolved to
/// `<origin>/playlists/<id>`.
///
/// # Arguments
///
/// * `input` - The playlist URL or identifier as given on the command line
/// * `origin` - The site origin used for bare identifiers
///
/// # Returns
///
/// * `Ok(Url)` - The playlist URL
/// * `Err(UrlError)` - The input is empty, malformed, or uses a non-HTTP scheme
///
/// # Examples
///
/// ```
/// use radcase::url::resolve_playlist_url;
/// use url::Url;
///
/// let origin = Url::parse("https://radiopaedia.org").unwrap();
/// let url = resolve_playlist_url("85715", &origin).unwrap();
/// assert_eq!(url.as_str(), "https://radiopaedia.org/playlists/85715");
/// ```
pub fn resolve_playlist_url(input: &str, origin: &Url) -> Result<Url, UrlError> {
    let input = input.trim();

    if input.is_empty() {
        return Err(UrlError::Malformed(
            "playlist URL or id cannot be empty".to_string(),
        ));
    }

    if input.contains("://") {
        let url = Url::parse(input).map_err(|e| UrlError::Parse(e.to_string()))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(UrlError::InvalidScheme(url.scheme().to_string()));
        }
        if url.host_str().is_none() {
            return Err(UrlError::MissingDomain);
        }
        return Ok(url);
    }

    let id = input.trim_start_matches('/');
    let id = id.strip_prefix(PLAYLIST_PATH_PREFIX).unwrap_or(id);

    if id.is_empty()
        || !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(UrlError::Malformed(format!(
            "'{}' is neither a URL nor a playlist id",
            input
        )));
    }

    origin
        .join(&format!("{}{}", PLAYLIST_PATH_PREFIX, id))
        .map_err(|e| UrlError::Parse(e.to_string()))
}

/// Returns the playlist identifier from a playlist URL
///
/// This is the last non-empty path segment, e.g. `85715` for
/// `https://radiopaedia.org/playlists/85715`.
pub fn playlist_id(url: &Url) -> Option<String> {
    url.path_segments()?
        .filter(|segment| !segment.is_empty())
        .last()
        .map(str::to_string)
}

/// Resolves an href or src attribute to an absolute URL against the origin
///
/// Returns None when the reference should be ignored:
/// - empty values and fragment-only anchors
/// - javascript:, mailto:, tel: and data: references
/// - anything that does not resolve to an HTTP(S) URL
pub fn absolutize(reference: &str, origin: &Url) -> Option<Url> {
    let reference = reference.trim();

    if reference.is_empty() || reference.starts_with('#') {
        return None;
    }

    if reference.starts_with("javascript:")
        || reference.starts_with("mailto:")
        || reference.starts_with("tel:")
        || reference.starts_with("data:")
    {
        return None;
    }

    let absolute = origin.join(reference).ok()?;
    if absolute.scheme() == "http" || absolute.scheme() == "https" {
        Some(absolute)
    } else {
        None
    }
}

/// Derives the case identifier from a case link
///
/// The identifier is the path segment directly following `/cases/`, with
/// any query string or fragment stripped.
///
/// # Examples
///
/// ```
/// use radcase::url::case_id;
///
/// assert_eq!(
///     case_id("/cases/12345-some-title?x=1#y"),
///     Some("12345-some-title".to_string())
/// );
/// assert_eq!(case_id("/articles/something"), None);
/// ```
pub fn case_id(link: &str) -> Option<String> {
    let start = link.find(CASE_PATH_MARKER)? + CASE_PATH_MARKER.len();
    let rest = &link[start..];
    let end = rest.find(['?', '#', '/']).unwrap_or(rest.len());
    let id = &rest[..end];

    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

/// Returns the origin (`scheme://host[:port]`) of a URL as a string key
pub fn origin_key(url: &Url) -> String {
    url.origin().ascii_serialization()
}
