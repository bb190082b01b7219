//! Record types produced by the scraper
//!
//! - `CaseRecord`: structured data from one case page
//! - `PlaylistResult`: playlist metadata plus its `CaseSummary` list
//!
//! Records are built once by the extractor, appended to a result list and
//! serialized wholesale; nothing updates them in place.

mod case;
mod playlist;

pub use case::CaseRecord;
pub use playlist::{CaseSummary, PlaylistResult};
