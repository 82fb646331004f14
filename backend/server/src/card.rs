//! Per-card presentation, derived on every render.
//!
//! Missing or broken images and websites degrade to placeholders here rather than failing.
use colleges::{CollegeRecord, is_absolute_http_url};
use serde::Serialize;

const SECURE_SCHEME: &str = "https://";
const BLANK: &str = "—";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "src", rename_all = "snake_case")]
pub enum CardImage {
    Photo(String),
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "href", rename_all = "snake_case")]
pub enum WebsiteLink {
    Active(String),
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub id: String,
    pub name: String,
    pub district: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub ownership: String,
    pub image: CardImage,
    pub website: WebsiteLink,
}

impl CardView {
    pub fn from_record(college: &CollegeRecord) -> Self {
        Self {
            id: college.id.clone(),
            name: college.name.clone(),
            district: college.district.clone(),
            kind: or_blank(&college.kind),
            ownership: or_blank(&college.ownership),
            image: card_image(college.image_url.as_deref()),
            website: website_link(college.website.as_deref()),
        }
    }
}

fn or_blank(value: &str) -> String {
    match value.trim() {
        "" => BLANK.to_string(),
        trimmed => trimmed.to_string(),
    }
}

pub fn card_image(image_url: Option<&str>) -> CardImage {
    match image_url {
        Some(url) if is_absolute_http_url(url) => CardImage::Photo(url.to_string()),
        _ => CardImage::Placeholder,
    }
}

/// Bare hostnames get `https://`. Nothing is ever derived from other fields.
pub fn website_link(website: Option<&str>) -> WebsiteLink {
    let Some(website) = website.map(str::trim).filter(|w| !w.is_empty()) else {
        return WebsiteLink::Disabled;
    };

    let lower = website.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        WebsiteLink::Active(website.to_string())
    } else {
        WebsiteLink::Active(format!("{SECURE_SCHEME}{website}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn college(image_url: Option<&str>, website: Option<&str>) -> CollegeRecord {
        CollegeRecord {
            id: "1".to_string(),
            name: "ABC Engineering College".to_string(),
            district: "  Pune ".to_string(),
            kind: " Government ".to_string(),
            ownership: "   ".to_string(),
            image_url: image_url.map(str::to_string),
            website: website.map(str::to_string),
            verified: true,
            created_at: None,
        }
    }

    #[test]
    fn bare_hostname_gets_https() {
        assert_eq!(
            website_link(Some("abc.edu")),
            WebsiteLink::Active("https://abc.edu".to_string())
        );
    }

    #[test]
    fn absolute_website_is_kept() {
        assert_eq!(
            website_link(Some("http://abc.edu/home")),
            WebsiteLink::Active("http://abc.edu/home".to_string())
        );
        assert_eq!(
            website_link(Some("HTTPS://abc.edu")),
            WebsiteLink::Active("HTTPS://abc.edu".to_string())
        );
    }

    #[test]
    fn missing_website_is_disabled() {
        assert_eq!(website_link(None), WebsiteLink::Disabled);
        assert_eq!(website_link(Some("  ")), WebsiteLink::Disabled);
    }

    #[test]
    fn relative_image_is_placeholder() {
        assert_eq!(card_image(Some("not-a-url")), CardImage::Placeholder);
        assert_eq!(card_image(None), CardImage::Placeholder);
        assert_eq!(
            card_image(Some("https://cdn.example.com/abc.jpg")),
            CardImage::Photo("https://cdn.example.com/abc.jpg".to_string())
        );
    }

    #[test]
    fn card_trims_labels_and_marks_blanks() {
        let card = CardView::from_record(&college(None, None));

        assert_eq!(card.district, "  Pune ");
        assert_eq!(card.kind, "Government");
        assert_eq!(card.ownership, BLANK);
        assert_eq!(card.image, CardImage::Placeholder);
        assert_eq!(card.website, WebsiteLink::Disabled);
    }

    #[test]
    fn card_serializes_for_templates() {
        let card = CardView::from_record(&college(Some("https://img/1.png"), Some("abc.edu")));
        let value = serde_json::to_value(&card).expect("json");

        assert_eq!(value["type"], "Government");
        assert_eq!(value["image"]["kind"], "photo");
        assert_eq!(value["image"]["src"], "https://img/1.png");
        assert_eq!(value["website"]["kind"], "active");
        assert_eq!(value["website"]["href"], "https://abc.edu");
    }
}
