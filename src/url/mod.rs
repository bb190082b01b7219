//! URL handling module
//!
//! This module resolves playlist arguments into URLs, turns relative links
//! and image sources into absolute URLs against the site origin, and derives
//! case identifiers from case links.

mod normalize;

pub use normalize::{
    absolutize, case_id, origin_key, playlist_id, resolve_playlist_url, CASE_PATH_MARKER,
};
