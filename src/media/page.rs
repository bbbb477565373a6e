//! Post page classification.

use std::fmt;

/// What a post page turned out to contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Video,
    Slideshow,
    Unavailable,
    Unknown,
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageKind::Video => write!(f, "video"),
            PageKind::Slideshow => write!(f, "slideshow"),
            PageKind::Unavailable => write!(f, "unavailable"),
            PageKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// Result of fetching and classifying a post page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub kind: PageKind,

    /// Rendered markup, kept only for slideshows.
    pub markup: Option<String>,
}

impl FetchedPage {
    /// A page of the given kind without markup.
    pub fn of(kind: PageKind) -> Self {
        Self { kind, markup: None }
    }

    /// A slideshow page together with its markup.
    pub fn slideshow(markup: String) -> Self {
        Self {
            kind: PageKind::Slideshow,
            markup: Some(markup),
        }
    }
}

/// Which page markers were found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkerSet {
    pub slideshow: bool,
    pub unavailable: bool,
    pub video: bool,
}

impl MarkerSet {
    /// Classify a page from its markers.
    ///
    /// Slideshow images win over the unavailable notice, which wins over a
    /// plain video element.
    pub fn classify(&self) -> PageKind {
        if self.slideshow {
            PageKind::Slideshow
        } else if self.unavailable {
            PageKind::Unavailable
        } else if self.video {
            PageKind::Video
        } else {
            PageKind::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_priority() {
        let all = MarkerSet {
            slideshow: true,
            unavailable: true,
            video: true,
        };
        assert_eq!(all.classify(), PageKind::Slideshow);

        let unavailable_video = MarkerSet {
            slideshow: false,
            unavailable: true,
            video: true,
        };
        assert_eq!(unavailable_video.classify(), PageKind::Unavailable);

        let video = MarkerSet {
            video: true,
            ..Default::default()
        };
        assert_eq!(video.classify(), PageKind::Video);

        assert_eq!(MarkerSet::default().classify(), PageKind::Unknown);
    }

    #[test]
    fn test_fetched_page_constructors() {
        let page = FetchedPage::slideshow("<html></html>".to_string());
        assert_eq!(page.kind, PageKind::Slideshow);
        assert!(page.markup.is_some());

        let page = FetchedPage::of(PageKind::Video);
        assert_eq!(page.kind, PageKind::Video);
        assert!(page.markup.is_none());
    }
}
