use crate::{core::geo::LatLng, data::geojson::GeoJsonFeature, input::events::FeatureClick};

/// Text shown in a stop popup
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PopupContent {
    pub title: String,
    pub body: String,
}

impl PopupContent {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Title from `stop`, falling back to `name`; body from `label`.
    /// Missing properties leave the text empty.
    pub fn from_feature(feature: Option<&GeoJsonFeature>) -> Self {
        let Some(feature) = feature else {
            return Self::default();
        };
        let title = feature
            .property_text("stop")
            .or_else(|| feature.property_text("name"))
            .unwrap_or_default();
        let body = feature.property_text("label").unwrap_or_default();
        Self { title, body }
    }

    /// Markup for the popup body, with feature text escaped
    pub fn html(&self) -> String {
        format!(
            "<strong>{}</strong><br/>{}",
            escape_html(&self.title),
            escape_html(&self.body)
        )
    }
}

/// Transient info popup anchored to a map position
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub position: LatLng,
    pub content: PopupContent,
}

impl Popup {
    pub fn new(position: LatLng, content: PopupContent) -> Self {
        Self { position, content }
    }

    /// Builds the popup for a stop click; `None` when the click has no usable position
    pub fn from_click(click: &FeatureClick) -> Option<Self> {
        let position = click.anchor()?;
        Some(Self::new(
            position,
            PopupContent::from_feature(click.feature.as_ref()),
        ))
    }

    pub fn html(&self) -> String {
        self.content.html()
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feature(properties: serde_json::Value) -> GeoJsonFeature {
        serde_json::from_value(json!({
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [-122.3, 47.65]},
            "properties": properties
        }))
        .unwrap()
    }

    #[test]
    fn test_stop_and_label() {
        let content = PopupContent::from_feature(Some(&feature(json!({"stop": "X", "label": "Y"}))));
        assert_eq!(content, PopupContent::new("X", "Y"));
        assert_eq!(content.html(), "<strong>X</strong><br/>Y");
    }

    #[test]
    fn test_name_fallback() {
        let content = PopupContent::from_feature(Some(&feature(json!({"name": "Odegaard"}))));
        assert_eq!(content, PopupContent::new("Odegaard", ""));
    }

    #[test]
    fn test_missing_properties_give_empty_text() {
        let content = PopupContent::from_feature(Some(&feature(json!(null))));
        assert_eq!(content, PopupContent::default());
        assert_eq!(PopupContent::from_feature(None), PopupContent::default());
        assert_eq!(content.html(), "<strong></strong><br/>");
    }

    #[test]
    fn test_text_is_escaped() {
        let content = PopupContent::new("<b>Stop</b>", "Fish & Chips");
        assert_eq!(
            content.html(),
            "<strong>&lt;b&gt;Stop&lt;/b&gt;</strong><br/>Fish &amp; Chips"
        );
    }

    #[test]
    fn test_popup_from_click() {
        let click = FeatureClick::new(Some(feature(json!({"stop": "X"}))), None);
        let popup = Popup::from_click(&click).unwrap();
        assert_eq!(popup.position, LatLng::new(47.65, -122.3));
        assert_eq!(popup.content.title, "X");

        assert!(Popup::from_click(&FeatureClick::new(None, None)).is_none());
    }
}
