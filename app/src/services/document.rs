//! Layout of the single-page PDF export.
//!
//! Title at the top, QR image centred at 60% of the shorter page side,
//! generation date in the footer, and a wrapped URL caption when the
//! encoded text is an absolute URL.

use chrono::NaiveDate;
use page_composer::metrics::MM_PER_PT;
use page_composer::{Align, DocumentComposer, PageSize, Rect, TextSpec, wrap_text};
use url::Url;

pub const TITLE: &str = "QR Code";
const TITLE_FONT_SIZE: f32 = 16.0;
const TITLE_Y_MM: f32 = 30.0;
const TITLE_COLOR: [u8; 3] = [50, 50, 50];

const QR_PAGE_FRACTION: f32 = 0.6;

const FOOTER_FONT_SIZE: f32 = 10.0;
const FOOTER_OFFSET_MM: f32 = 20.0;
const FOOTER_COLOR: [u8; 3] = [100, 100, 100];

const CAPTION_FONT_SIZE: f32 = 8.0;
const CAPTION_OFFSET_MM: f32 = 30.0;
const CAPTION_SIDE_MARGIN_MM: f32 = 20.0;
const LINE_HEIGHT_FACTOR: f32 = 1.15;

/// True if `text` parses as an absolute URL.
pub fn is_valid_url(text: &str) -> bool {
    Url::parse(text).is_ok()
}

/// Date as shown in the footer, e.g. `10/18/2026`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

/// Positions of everything placed on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout {
    pub page: PageSize,
    pub title: TextSpec,
    pub image: Rect,
    pub footer: TextSpec,
    /// Empty unless the source text is a URL.
    pub caption: Vec<TextSpec>,
}

/// Compute the page layout for `text` generated on `date`.
pub fn layout(page: PageSize, text: &str, date: NaiveDate) -> DocumentLayout {
    let center_x = page.width_mm / 2.0;

    let title = TextSpec::new(TITLE, center_x, TITLE_Y_MM, TITLE_FONT_SIZE)
        .with_color(TITLE_COLOR)
        .with_align(Align::Center);

    let qr_side = page.shorter_side() * QR_PAGE_FRACTION;
    let image = Rect {
        x: (page.width_mm - qr_side) / 2.0,
        y: (page.height_mm - qr_side) / 2.0,
        width: qr_side,
        height: qr_side,
    };

    let footer = TextSpec::new(
        format!("Generated on {}", format_date(date)),
        center_x,
        page.height_mm - FOOTER_OFFSET_MM,
        FOOTER_FONT_SIZE,
    )
    .with_color(FOOTER_COLOR)
    .with_align(Align::Center);

    let caption = if is_valid_url(text) {
        let max_width = page.width_mm - 2.0 * CAPTION_SIDE_MARGIN_MM;
        let line_height = CAPTION_FONT_SIZE * LINE_HEIGHT_FACTOR * MM_PER_PT;
        let first_y = page.height_mm - CAPTION_OFFSET_MM;
        wrap_text(&format!("URL: {text}"), CAPTION_FONT_SIZE, max_width)
            .into_iter()
            .enumerate()
            .map(|(i, line)| {
                TextSpec::new(
                    line,
                    center_x,
                    first_y + i as f32 * line_height,
                    CAPTION_FONT_SIZE,
                )
                .with_color(FOOTER_COLOR)
                .with_align(Align::Center)
            })
            .collect()
    } else {
        Vec::new()
    };

    DocumentLayout {
        page,
        title,
        image,
        footer,
        caption,
    }
}

/// Compose the export document with the given capability.
pub fn compose_document(
    composer: &dyn DocumentComposer,
    text: &str,
    png: &[u8],
    date: NaiveDate,
) -> page_composer::Result<Vec<u8>> {
    let layout = layout(PageSize::A4_PORTRAIT, text, date);
    let mut page = composer.begin_page(layout.page)?;

    page.text(&layout.title)?;
    page.image_png(png, layout.image)?;
    page.text(&layout.footer)?;
    for line in &layout.caption {
        page.text(line)?;
    }

    page.finish()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use page_composer::PageCanvas;
    use std::sync::{Arc, Mutex};

    /// Composer that records every placement and returns a fixed payload.
    #[derive(Default, Clone)]
    pub(crate) struct RecordingComposer {
        pub texts: Arc<Mutex<Vec<TextSpec>>>,
        pub images: Arc<Mutex<Vec<Rect>>>,
    }

    struct RecordingPage {
        sink: RecordingComposer,
    }

    impl DocumentComposer for RecordingComposer {
        fn begin_page(&self, _size: PageSize) -> page_composer::Result<Box<dyn PageCanvas>> {
            Ok(Box::new(RecordingPage { sink: self.clone() }))
        }
    }

    impl PageCanvas for RecordingPage {
        fn text(&mut self, spec: &TextSpec) -> page_composer::Result<()> {
            self.sink.texts.lock().unwrap().push(spec.clone());
            Ok(())
        }

        fn image_png(&mut self, _png: &[u8], rect: Rect) -> page_composer::Result<()> {
            self.sink.images.lock().unwrap().push(rect);
            Ok(())
        }

        fn finish(self: Box<Self>) -> page_composer::Result<Vec<u8>> {
            Ok(b"%PDF-recorded".to_vec())
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn url_detection() {
        assert!(is_valid_url("https://example.com"));
        assert!(is_valid_url("mailto:someone@example.com"));
        assert!(!is_valid_url("not a url"));
        assert!(!is_valid_url("example.com"));
        assert!(!is_valid_url(""));
    }

    #[test]
    fn footer_date_format() {
        assert_eq!(format_date(date()), "10/18/2026");
        assert_eq!(
            format_date(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()),
            "1/5/2026"
        );
    }

    #[test]
    fn qr_is_centered_at_sixty_percent() {
        let l = layout(PageSize::A4_PORTRAIT, "hello", date());
        assert!((l.image.width - 126.0).abs() < 1e-3);
        assert_eq!(l.image.width, l.image.height);
        assert!((l.image.x - 42.0).abs() < 1e-3);
        assert!((l.image.y - 85.5).abs() < 1e-3);
    }

    #[test]
    fn title_and_footer_positions() {
        let l = layout(PageSize::A4_PORTRAIT, "hello", date());
        assert_eq!(l.title.text, "QR Code");
        assert_eq!(l.title.y, 30.0);
        assert_eq!(l.title.align, Align::Center);
        assert_eq!(l.footer.text, "Generated on 10/18/2026");
        assert_eq!(l.footer.y, 277.0);
        assert_eq!(l.footer.font_size, 10.0);
    }

    #[test]
    fn caption_present_only_for_urls() {
        let with_url = layout(PageSize::A4_PORTRAIT, "https://example.com", date());
        assert_eq!(with_url.caption.len(), 1);
        assert_eq!(with_url.caption[0].text, "URL: https://example.com");
        assert_eq!(with_url.caption[0].y, 267.0);

        let plain = layout(PageSize::A4_PORTRAIT, "not a url", date());
        assert!(plain.caption.is_empty());
    }

    #[test]
    fn long_url_caption_wraps_downwards() {
        let url = format!("https://example.com/{}", "segment/".repeat(60));
        let l = layout(PageSize::A4_PORTRAIT, &url, date());
        assert!(l.caption.len() > 2);
        assert!(l.caption[1].y > l.caption[0].y);
        assert!(l.caption[0].text.starts_with("URL: https://example.com/"));
        let joined: String = l.caption.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(joined, format!("URL: {url}"));
    }

    #[test]
    fn compose_places_all_elements() {
        let composer = RecordingComposer::default();
        let bytes = compose_document(&composer, "https://example.com", b"png", date()).unwrap();
        assert_eq!(bytes, b"%PDF-recorded");
        let texts = composer.texts.lock().unwrap();
        let labels: Vec<&str> = texts.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(
            labels,
            vec!["QR Code", "Generated on 10/18/2026", "URL: https://example.com"]
        );
        assert_eq!(composer.images.lock().unwrap().len(), 1);
    }
}
