//! Media module for post page handling.
//!
//! Provides:
//! - Page classification (video, slideshow, unavailable)
//! - Marker detection and slideshow image extraction from markup

pub mod page;
pub mod parser;

pub use page::{FetchedPage, MarkerSet, PageKind};
pub use parser::{extract_slideshow_links, PageMarkers};
