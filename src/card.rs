use crate::handlers::Intent;
use crate::model::{ShowId, ShowSummary};
use regex::Regex;
use std::sync::LazyLock;

pub const SUMMARY_PLACEHOLDER_URL: &str = "https://via.placeholder.com/210x295";
pub const DETAILED_PLACEHOLDER_URL: &str = "https://via.placeholder.com/1058x353";
pub const NO_SUMMARY_TEXT: &str = "There is no summary for that show yet.";
pub const SUMMARY_PREVIEW_CHARS: usize = 80;
pub const ELLIPSIS: &str = "...";

static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<[^>]*>").expect("tag pattern is a valid regex")
});

/// Remove everything that looks like a markup tag.
///
/// This is a pattern match, not a parser: entities such as `&amp;` are left
/// as-is and an unterminated `<` is kept verbatim.
pub fn strip_markup(markup: &str) -> String {
    TAG_PATTERN.replace_all(markup, "").into_owned()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    Summary,
    Detailed,
}

/// How the image reference is meant to be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImagePlacement {
    /// Inline poster above the title.
    Thumbnail,
    /// Full-bleed background behind the detailed card.
    Backdrop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardImage {
    pub url: String,
    pub placement: ImagePlacement,
    pub is_placeholder: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    Primary,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardAction {
    pub label: &'static str,
    pub style: ButtonStyle,
    pub intent: Intent,
}

/// Backend-independent view-model for one show card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub show_id: ShowId,
    pub kind: CardKind,
    pub title: String,
    pub image: CardImage,
    pub body: String,
    pub action: CardAction,
}

/// Builds fresh cards. The caller decides where the card goes and binds
/// its action.
pub struct CardBuilder;

impl CardBuilder {
    pub fn build(show: &ShowSummary, kind: CardKind) -> Card {
        Card {
            show_id: show.id,
            kind,
            title: show.name.clone(),
            image: Self::image(show, kind),
            body: Self::body(show, kind),
            action: Self::action(show.id, kind),
        }
    }

    fn image(show: &ShowSummary, kind: CardKind) -> CardImage {
        match (&show.image, kind) {
            (Some(image), CardKind::Summary) => CardImage {
                url: image.medium_url.clone(),
                placement: ImagePlacement::Thumbnail,
                is_placeholder: false,
            },
            (Some(image), CardKind::Detailed) => CardImage {
                url: image.original_url.clone(),
                placement: ImagePlacement::Backdrop,
                is_placeholder: false,
            },
            (None, CardKind::Summary) => CardImage {
                url: SUMMARY_PLACEHOLDER_URL.to_string(),
                placement: ImagePlacement::Thumbnail,
                is_placeholder: true,
            },
            (None, CardKind::Detailed) => CardImage {
                url: DETAILED_PLACEHOLDER_URL.to_string(),
                placement: ImagePlacement::Thumbnail,
                is_placeholder: true,
            },
        }
    }

    fn body(show: &ShowSummary, kind: CardKind) -> String {
        let Some(markup) = show.summary_markup() else {
            return NO_SUMMARY_TEXT.to_string();
        };
        let text = strip_markup(markup);
        match kind {
            CardKind::Detailed => text,
            CardKind::Summary => {
                let mut preview: String = text.chars().take(SUMMARY_PREVIEW_CHARS).collect();
                preview.push_str(ELLIPSIS);
                preview
            }
        }
    }

    fn action(id: ShowId, kind: CardKind) -> CardAction {
        match kind {
            CardKind::Summary => CardAction {
                label: "Show details",
                style: ButtonStyle::Primary,
                intent: Intent::OpenDetails(id),
            },
            CardKind::Detailed => CardAction {
                label: "Close details",
                style: ButtonStyle::Danger,
                intent: Intent::CloseDetails(id),
            },
        }
    }
}
