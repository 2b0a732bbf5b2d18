//! What a card shows: its label, thumbnail image and colors

use eframe::egui::Color32;
use url::Url;

use crate::color::color_or;
use crate::constants::cards;
use crate::types::{Card, Mode};

/// Hostname for web targets, last path segment for folders
///
/// Falls back to the raw target when neither can be derived.
pub fn display_label(mode: Mode, card: &Card) -> String {
    match mode {
        Mode::Web => web_host(&card.target).unwrap_or_else(|| card.target.clone()),
        Mode::Folders => folder_name(&card.target).to_string(),
    }
}

/// Custom image if set, otherwise the favicon for web cards; folders have no default
pub fn thumbnail_uri(mode: Mode, card: &Card) -> Option<String> {
    if let Some(image) = &card.image {
        return Some(image.clone());
    }
    match mode {
        Mode::Web => web_host(&card.target).map(|host| favicon_uri(&host)),
        Mode::Folders => None,
    }
}

/// Whether the thumbnail fills the card (custom image) or sits as an icon (favicon)
pub fn is_custom_image(card: &Card) -> bool {
    card.image.is_some()
}

/// Folder cards with a title hide the path label
pub fn shows_label(mode: Mode, card: &Card) -> bool {
    mode == Mode::Web || card.title.is_none()
}

pub fn background_color(card: &Card) -> Color32 {
    color_or(card.theme_color.as_deref(), cards::DEFAULT_BACKGROUND)
}

pub fn title_color(card: &Card) -> Color32 {
    color_or(card.theme_color.as_deref(), cards::DEFAULT_TITLE_COLOR)
}

pub fn favicon_uri(host: &str) -> String {
    cards::FAVICON_URL_TEMPLATE.replace("{}", host)
}

fn web_host(target: &str) -> Option<String> {
    let url = Url::parse(target).ok()?;
    url.host_str()
        .filter(|host| !host.is_empty())
        .map(str::to_string)
}

fn folder_name(target: &str) -> &str {
    target
        .split(['/', '\\'])
        .filter(|segment| !segment.is_empty())
        .last()
        .unwrap_or(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(target: &str) -> Card {
        Card {
            id: "1".to_string(),
            title: None,
            target: target.to_string(),
            image: None,
            theme_color: None,
        }
    }

    #[test]
    fn test_web_label_is_hostname() {
        assert_eq!(display_label(Mode::Web, &card("https://docs.rs/serde/latest")), "docs.rs");
        assert_eq!(display_label(Mode::Web, &card("not a url")), "not a url");
        assert_eq!(display_label(Mode::Web, &card("file:///tmp/x")), "file:///tmp/x");
    }

    #[test]
    fn test_folder_label_is_last_segment() {
        assert_eq!(display_label(Mode::Folders, &card("/home/me/projects")), "projects");
        assert_eq!(display_label(Mode::Folders, &card(r"C:\Users\me\Documents")), "Documents");
        assert_eq!(display_label(Mode::Folders, &card("/srv/data/")), "data");
        assert_eq!(display_label(Mode::Folders, &card("/")), "/");
    }

    #[test]
    fn test_thumbnail_prefers_custom_image() {
        let mut c = card("https://example.com");
        assert_eq!(
            thumbnail_uri(Mode::Web, &c).as_deref(),
            Some("https://www.google.com/s2/favicons?domain=example.com&sz=128")
        );
        c.image = Some("file:///tmp/pic.png".to_string());
        assert_eq!(thumbnail_uri(Mode::Web, &c).as_deref(), Some("file:///tmp/pic.png"));
        assert!(is_custom_image(&c));
    }

    #[test]
    fn test_folders_have_no_default_thumbnail() {
        assert_eq!(thumbnail_uri(Mode::Folders, &card("/home/me")), None);
        assert_eq!(thumbnail_uri(Mode::Web, &card("garbage")), None);
    }

    #[test]
    fn test_label_visibility() {
        let mut c = card("/home/me");
        assert!(shows_label(Mode::Folders, &c));
        c.title = Some("Home".to_string());
        assert!(!shows_label(Mode::Folders, &c));
        assert!(shows_label(Mode::Web, &c));
    }

    #[test]
    fn test_colors_default_without_theme() {
        let mut c = card("https://example.com");
        assert_eq!(background_color(&c), Color32::from_rgb(0x0a, 0x0a, 0x0a));
        assert_eq!(title_color(&c), Color32::from_rgb(0xd0, 0xd0, 0xd0));
        c.theme_color = Some("#ff0000".to_string());
        assert_eq!(background_color(&c), Color32::from_rgb(0xff, 0, 0));
    }
}
