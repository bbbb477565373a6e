//! Markup parsing utilities.

use scraper::{ElementRef, Html, Selector};

use crate::config::SelectorConfig;
use crate::error::{Error, Result};
use crate::media::page::{FetchedPage, MarkerSet, PageKind};

/// Compiled selectors for the markers that identify a post page.
#[derive(Debug, Clone)]
pub struct PageMarkers {
    slideshow_image: Selector,
    error_container: Selector,
    video: Selector,
    unavailable_text: String,
    wait_selector: String,
}

impl PageMarkers {
    /// Compile the markers from configuration.
    pub fn from_config(selectors: &SelectorConfig) -> Result<Self> {
        Ok(Self {
            slideshow_image: compile("selectors.slideshow_image", &selectors.slideshow_image)?,
            error_container: compile("selectors.error_container", &selectors.error_container)?,
            video: compile("selectors.video", &selectors.video)?,
            unavailable_text: selectors.unavailable_text.clone(),
            wait_selector: format!(
                "{}, {}, {}",
                selectors.video, selectors.slideshow_image, selectors.error_container
            ),
        })
    }

    /// Selector matching any of the three markers, used while waiting for a
    /// page to render.
    pub fn wait_selector(&self) -> &str {
        &self.wait_selector
    }

    /// Find which markers are present in the markup.
    pub fn detect_markers(&self, markup: &str) -> MarkerSet {
        let document = Html::parse_document(markup);

        MarkerSet {
            slideshow: document.select(&self.slideshow_image).next().is_some(),
            unavailable: document
                .select(&self.error_container)
                .any(|el| element_text(&el).contains(&self.unavailable_text)),
            video: document.select(&self.video).next().is_some(),
        }
    }

    /// Classify rendered markup, keeping the markup for slideshows.
    pub fn classify_markup(&self, markup: String) -> FetchedPage {
        match self.detect_markers(&markup).classify() {
            PageKind::Slideshow => FetchedPage::slideshow(markup),
            kind => FetchedPage::of(kind),
        }
    }

    /// Extract the slideshow image links from the markup.
    pub fn slideshow_links(&self, markup: &str) -> Vec<String> {
        extract_slideshow_links(markup, &self.slideshow_image)
    }
}

/// Collect the `src` of every element matching `selector`, dropping
/// duplicates while keeping first-seen order. Elements without `src` are
/// ignored.
pub fn extract_slideshow_links(markup: &str, selector: &Selector) -> Vec<String> {
    let document = Html::parse_document(markup);

    let mut links: Vec<String> = document
        .select(selector)
        .filter_map(|el| el.value().attr("src"))
        .map(str::to_string)
        .collect();

    let mut seen = std::collections::HashSet::new();
    links.retain(|link| seen.insert(link.clone()));

    links
}

fn compile(field: &str, selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| Error::ConfigValidation {
        field: field.to_string(),
        message: format!("Invalid CSS selector '{}': {}", selector, e),
    })
}

fn element_text(el: &ElementRef<'_>) -> String {
    el.text().collect::<String>()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markers() -> PageMarkers {
        PageMarkers::from_config(&SelectorConfig::default()).unwrap()
    }

    fn slide(src: Option<&str>) -> String {
        match src {
            Some(src) => format!(
                r#"<img class="css-brxox6-ImgPhotoSlide e10jea832" src="{}" alt="">"#,
                src
            ),
            None => r#"<img class="css-brxox6-ImgPhotoSlide e10jea832" alt="">"#.to_string(),
        }
    }

    #[test]
    fn test_extract_distinct_links_in_order() {
        let markup = format!(
            "<html><body><div>{}{}{}</div></body></html>",
            slide(Some("https://cdn.example/c.jpeg")),
            slide(Some("https://cdn.example/a.jpeg")),
            slide(Some("https://cdn.example/b.jpeg")),
        );

        assert_eq!(
            markers().slideshow_links(&markup),
            vec![
                "https://cdn.example/c.jpeg",
                "https://cdn.example/a.jpeg",
                "https://cdn.example/b.jpeg",
            ]
        );
    }

    #[test]
    fn test_extract_skips_missing_src() {
        let markup = format!(
            "<div>{}{}{}</div>",
            slide(Some("https://cdn.example/1.jpeg")),
            slide(None),
            slide(Some("https://cdn.example/2.jpeg")),
        );

        assert_eq!(markers().slideshow_links(&markup).len(), 2);
    }

    #[test]
    fn test_extract_deduplicates_at_first_position() {
        // The slideshow carousel repeats its first and last images.
        let markup = format!(
            "<div>{}{}{}{}</div>",
            slide(Some("https://cdn.example/2.jpeg")),
            slide(Some("https://cdn.example/1.jpeg")),
            slide(Some("https://cdn.example/2.jpeg")),
            slide(Some("https://cdn.example/1.jpeg")),
        );

        assert_eq!(
            markers().slideshow_links(&markup),
            vec!["https://cdn.example/2.jpeg", "https://cdn.example/1.jpeg"]
        );
    }

    #[test]
    fn test_extract_requires_both_classes() {
        let markup = r#"<img class="css-brxox6-ImgPhotoSlide" src="https://cdn.example/x.jpeg">"#;
        assert!(markers().slideshow_links(markup).is_empty());
    }

    #[test]
    fn test_slideshow_wins_over_video() {
        let markup = format!(
            "<div><video src=\"blob:x\"></video>{}</div>",
            slide(Some("https://cdn.example/1.jpeg"))
        );

        let page = markers().classify_markup(markup.clone());
        assert_eq!(page.kind, PageKind::Slideshow);
        assert_eq!(page.markup, Some(markup));
    }

    #[test]
    fn test_unavailable_requires_text() {
        let unavailable = r#"<div class="css-1osbocj-DivErrorContainer"><p>Video currently unavailable</p></div><video></video>"#;
        assert_eq!(
            markers().classify_markup(unavailable.to_string()).kind,
            PageKind::Unavailable
        );

        let other_error = r#"<div class="css-1osbocj-DivErrorContainer"><p>Something went wrong</p></div><video></video>"#;
        assert_eq!(
            markers().classify_markup(other_error.to_string()).kind,
            PageKind::Video
        );
    }

    #[test]
    fn test_video_and_unknown() {
        let page = markers().classify_markup("<div><video></video></div>".to_string());
        assert_eq!(page, FetchedPage::of(PageKind::Video));

        let page = markers().classify_markup("<div><p>loading</p></div>".to_string());
        assert_eq!(page, FetchedPage::of(PageKind::Unknown));
    }

    #[test]
    fn test_invalid_marker_selector_rejected() {
        let selectors = SelectorConfig {
            video: "video[".to_string(),
            ..SelectorConfig::default()
        };

        match PageMarkers::from_config(&selectors) {
            Err(Error::ConfigValidation { field, .. }) => assert_eq!(field, "selectors.video"),
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_wait_selector_covers_all_markers() {
        let selector = markers().wait_selector().to_string();
        assert!(selector.contains("video"));
        assert!(selector.contains(".css-brxox6-ImgPhotoSlide.e10jea832"));
        assert!(selector.contains(".css-1osbocj-DivErrorContainer"));
        assert!(Selector::parse(&selector).is_ok());
    }
}
