//! Field extraction from playlist and case pages
//!
//! Every logical field has an ordered list of strategies. Each strategy is a
//! plain function from the parsed document to an optional value; the first
//! one that produces a non-empty value wins, and a field nothing matches
//! falls back to its empty default. A missing section never fails a record.
//!
//! | Field | Strategies, in order |
//! |-------|----------------------|
//! | title | first `h1`, `og:title` meta, `<title>` |
//! | patient data | `data-section="patient-data"` definition list, `.patient-data` table, presentation section |
//! | study | `data-section="study"`, `.study-desc` |
//! | findings | `data-section="findings"`, `.case-section.findings`, `.findings` |
//! | diagnosis | `data-section="diagnosis"`, `.diagnosis` |
//! | discussion | `data-section="discussion"`, `.case-section.discussion`, `.discussion` |

use crate::record::{CaseRecord, CaseSummary, PlaylistResult};
use crate::url::{absolutize, case_id, playlist_id, CASE_PATH_MARKER};
use indexmap::IndexMap;
use scraper::{ElementRef, Html, Node, Selector};
use std::collections::HashSet;
use url::Url;

/// One heuristic rule for locating a field's value in a document
pub type Strategy<T> = fn(&Html) -> Option<T>;

/// A value that can be "empty" and has an empty default
pub trait FieldValue: Default {
    fn is_empty_value(&self) -> bool;
}

impl FieldValue for String {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T> FieldValue for Vec<T> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl FieldValue for IndexMap<String, String> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

/// Runs strategies in order and returns the first non-empty value
pub fn first_match<T: FieldValue>(document: &Html, strategies: &[Strategy<T>]) -> Option<T> {
    strategies
        .iter()
        .find_map(|strategy| strategy(document).filter(|value| !value.is_empty_value()))
}

/// Runs strategies in order, falling back to the field's empty default
pub fn extract_or_default<T: FieldValue>(document: &Html, strategies: &[Strategy<T>]) -> T {
    first_match(document, strategies).unwrap_or_default()
}

pub const CASE_TITLE: &[Strategy<String>] = &[h1_text, og_title, title_text];

pub const PATIENT_DATA: &[Strategy<IndexMap<String, String>>] =
    &[patient_data_list, patient_data_table, presentation_only];

pub const STUDY: &[Strategy<String>] = &[study_marker, study_desc];

pub const FINDINGS: &[Strategy<String>] =
    &[findings_marker, findings_case_section, findings_class];

pub const DIAGNOSIS: &[Strategy<String>] = &[diagnosis_marker, diagnosis_class];

pub const DISCUSSION: &[Strategy<String>] =
    &[discussion_marker, discussion_case_section, discussion_class];

pub const PLAYLIST_TITLE: &[Strategy<String>] = &[h1_text, title_text];

pub const PLAYLIST_DESCRIPTION: &[Strategy<String>] = &[description_div, first_paragraph];

/// Builds a case record from a case page
///
/// # Arguments
///
/// * `html` - The case page HTML
/// * `url` - The case URL, stored on the record as-is
/// * `origin` - The site origin for resolving relative image sources
pub fn parse_case(html: &str, url: &str, origin: &Url) -> CaseRecord {
    let document = Html::parse_document(html);

    CaseRecord {
        url: url.to_string(),
        title: extract_or_default(&document, CASE_TITLE),
        patient_data: extract_or_default(&document, PATIENT_DATA),
        study: extract_or_default(&document, STUDY),
        findings: extract_or_default(&document, FINDINGS),
        diagnosis: extract_or_default(&document, DIAGNOSIS),
        discussion: extract_or_default(&document, DISCUSSION),
        images: extract_images(&document, origin),
    }
}

/// Builds the playlist result from a playlist page
///
/// The title falls back to `Playlist <id>` when the page has no heading.
pub fn parse_playlist(html: &str, playlist_url: &Url, origin: &Url) -> PlaylistResult {
    let document = Html::parse_document(html);
    let id = playlist_id(playlist_url).unwrap_or_default();

    PlaylistResult {
        title: first_match(&document, PLAYLIST_TITLE)
            .unwrap_or_else(|| format!("Playlist {}", id)),
        description: extract_or_default(&document, PLAYLIST_DESCRIPTION),
        cases: extract_case_links(&document, origin),
        url: playlist_url.to_string(),
        id,
    }
}

/// Discovers case links in a document
///
/// Keeps `<a href>` elements whose path contains `/cases/`, resolves them
/// against the origin, and deduplicates by case identifier while keeping the
/// first-seen order.
pub fn extract_case_links(document: &Html, origin: &Url) -> Vec<CaseSummary> {
    let mut cases = Vec::new();
    let mut seen = HashSet::new();

    let Ok(selector) = Selector::parse("a[href]") else {
        return cases;
    };

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if !href.contains(CASE_PATH_MARKER) {
            continue;
        }
        let Some(absolute) = absolutize(href, origin) else {
            continue;
        };
        let Some(id) = case_id(absolute.path()) else {
            continue;
        };

        if !seen.insert(id.clone()) {
            continue;
        }

        let text = element_text(element);
        cases.push(CaseSummary {
            title: if text.is_empty() {
                format!("Case {}", id)
            } else {
                text
            },
            url: absolute.to_string(),
            id,
        });
    }

    cases
}

/// Collects case image URLs in source order
///
/// Only images served from a CDN or from an `images` path segment are kept,
/// which leaves out logos, avatars and tracking pixels. Relative sources are
/// resolved against the origin; an URL seen twice is kept once.
pub fn extract_images(document: &Html, origin: &Url) -> Vec<String> {
    let mut images = Vec::new();
    let mut seen = HashSet::new();

    let Ok(selector) = Selector::parse("img[src]") else {
        return images;
    };

    for element in document.select(&selector) {
        let Some(src) = element.value().attr("src") else {
            continue;
        };
        let Some(absolute) = absolutize(src, origin) else {
            continue;
        };

        let in_images_dir = absolute
            .path_segments()
            .map(|mut segments| segments.any(|segment| segment == "images"))
            .unwrap_or(false);

        if !(src.contains("cdn") || in_images_dir) {
            continue;
        }

        let absolute = absolute.to_string();
        if seen.insert(absolute.clone()) {
            images.push(absolute);
        }
    }

    images
}

/// Collapses an element's text content into a single trimmed string
fn element_text(element: ElementRef) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

/// Section text without its leading caption, e.g. the "Findings" heading
///
/// Only a heading that is the section's first element child is dropped;
/// sub-headings further in are kept. Block elements are separated by a space.
fn section_text(element: ElementRef) -> String {
    let caption = element
        .children()
        .find_map(ElementRef::wrap)
        .filter(|first| is_heading(first.value().name()))
        .map(|first| first.id());
    let mut text = String::new();

    for node in element.descendants() {
        if caption.is_some_and(|id| node.ancestors().any(|ancestor| ancestor.id() == id)) {
            continue;
        }
        match node.value() {
            Node::Text(fragment) => text.push_str(fragment),
            Node::Element(el) if is_block(el.name()) => text.push(' '),
            _ => {}
        }
    }

    collapse_whitespace(&text)
}

fn is_heading(name: &str) -> bool {
    matches!(name, "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

fn is_block(name: &str) -> bool {
    is_heading(name)
        || matches!(
            name,
            "p" | "div"
                | "section"
                | "article"
                | "blockquote"
                | "pre"
                | "ul"
                | "ol"
                | "li"
                | "dl"
                | "dt"
                | "dd"
                | "table"
                | "tr"
                | "td"
                | "th"
                | "figure"
                | "figcaption"
                | "br"
        )
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text of the first non-empty element matching a CSS selector
fn select_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;

    document
        .select(&selector)
        .map(element_text)
        .find(|text| !text.is_empty())
}

fn h1_text(document: &Html) -> Option<String> {
    select_text(document, "h1")
}

fn title_text(document: &Html) -> Option<String> {
    select_text(document, "title")
}

fn og_title(document: &Html) -> Option<String> {
    let selector = Selector::parse(r#"meta[property="og:title"]"#).ok()?;

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("content"))
        .map(collapse_whitespace)
        .find(|text| !text.is_empty())
}

fn description_div(document: &Html) -> Option<String> {
    select_text(document, "div.description")
}

fn first_paragraph(document: &Html) -> Option<String> {
    select_text(document, "p")
}

fn study_marker(document: &Html) -> Option<String> {
    section_by_marker(document, "study")
}

fn study_desc(document: &Html) -> Option<String> {
    section_by_selector(document, ".study-desc")
}

fn findings_marker(document: &Html) -> Option<String> {
    section_by_marker(document, "findings")
}

fn findings_case_section(document: &Html) -> Option<String> {
    section_by_selector(document, ".case-section.findings")
}

fn findings_class(document: &Html) -> Option<String> {
    section_by_selector(document, ".findings")
}

fn diagnosis_marker(document: &Html) -> Option<String> {
    section_by_marker(document, "diagnosis")
}

fn diagnosis_class(document: &Html) -> Option<String> {
    section_by_selector(document, ".diagnosis")
}

fn discussion_marker(document: &Html) -> Option<String> {
    section_by_marker(document, "discussion")
}

fn discussion_case_section(document: &Html) -> Option<String> {
    section_by_selector(document, ".case-section.discussion")
}

fn discussion_class(document: &Html) -> Option<String> {
    section_by_selector(document, ".discussion")
}

/// Section marked with `data-section="<name>"`
fn section_by_marker(document: &Html, name: &str) -> Option<String> {
    section_by_selector(document, &format!(r#"[data-section="{}"]"#, name))
}

fn section_by_selector(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;

    document
        .select(&selector)
        .map(section_text)
        .find(|text| !text.is_empty())
}

/// Normalizes a patient data label: trimmed, without a trailing colon
fn label_text(element: ElementRef) -> String {
    element_text(element).trim_end_matches(':').trim_end().to_string()
}

/// `<dt>`/`<dd>` pairs inside the patient data section
fn patient_data_list(document: &Html) -> Option<IndexMap<String, String>> {
    let section = Selector::parse(r#"[data-section="patient-data"]"#).ok()?;
    let term = Selector::parse("dt").ok()?;
    let mut data = IndexMap::new();

    for container in document.select(&section) {
        for dt in container.select(&term) {
            let key = label_text(dt);
            if key.is_empty() {
                continue;
            }

            let value = dt
                .next_siblings()
                .filter_map(ElementRef::wrap)
                .take_while(|sibling| sibling.value().name() != "dt")
                .find(|sibling| sibling.value().name() == "dd")
                .map(element_text)
                .unwrap_or_default();

            data.entry(key).or_insert(value);
        }
    }

    Some(data)
}

/// `<th>`/`<td>` rows of a `.patient-data` table
fn patient_data_table(document: &Html) -> Option<IndexMap<String, String>> {
    let rows = Selector::parse(".patient-data tr").ok()?;
    let label = Selector::parse("th").ok()?;
    let cell = Selector::parse("td").ok()?;
    let mut data = IndexMap::new();

    for row in document.select(&rows) {
        let Some(key) = row.select(&label).next().map(label_text) else {
            continue;
        };
        if key.is_empty() {
            continue;
        }
        let value = row.select(&cell).next().map(element_text).unwrap_or_default();
        data.entry(key).or_insert(value);
    }

    Some(data)
}

/// Older case pages only carry a free-text presentation section
fn presentation_only(document: &Html) -> Option<IndexMap<String, String>> {
    let presentation = section_by_marker(document, "presentation")
        .or_else(|| section_by_selector(document, ".case-section.presentation"))?;

    let mut data = IndexMap::new();
    data.insert("Presentation".to_string(), presentation);
    Some(data)
}
