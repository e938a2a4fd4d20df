// ABOUTME: Routing table from <meta> attributes to MetadataRecord fields.
// ABOUTME: Resolves name/property/charset attributes in a fixed precedence order.

use crate::metadata::MetadataRecord;

/// A MetadataRecord string field that a `<meta>` tag can set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaField {
    Description,
    Keywords,
    Robots,
    Viewport,
    OgTitle,
    OgDescription,
    OgImage,
    OgUrl,
    OgType,
    OgSiteName,
    TwitterCard,
    TwitterTitle,
    TwitterDescription,
    TwitterImage,
    TwitterSite,
    Charset,
}

/// Standard tags matched on the `name` attribute.
const STANDARD_NAMES: &[(&str, MetaField)] = &[
    ("description", MetaField::Description),
    ("keywords", MetaField::Keywords),
    ("robots", MetaField::Robots),
    ("viewport", MetaField::Viewport),
];

/// Open Graph tags matched on the `property` attribute.
const OPEN_GRAPH_PROPERTIES: &[(&str, MetaField)] = &[
    ("og:title", MetaField::OgTitle),
    ("og:description", MetaField::OgDescription),
    ("og:image", MetaField::OgImage),
    ("og:url", MetaField::OgUrl),
    ("og:type", MetaField::OgType),
    ("og:site_name", MetaField::OgSiteName),
];

/// Twitter Card tags matched on the `name` attribute.
const TWITTER_NAMES: &[(&str, MetaField)] = &[
    ("twitter:card", MetaField::TwitterCard),
    ("twitter:title", MetaField::TwitterTitle),
    ("twitter:description", MetaField::TwitterDescription),
    ("twitter:image", MetaField::TwitterImage),
    ("twitter:site", MetaField::TwitterSite),
];

fn lookup(table: &[(&str, MetaField)], key: &str) -> Option<MetaField> {
    table
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, field)| *field)
}

/// Decides which field a `<meta>` tag sets, if any.
///
/// `name` and `property` must already be lower-cased. Precedence:
/// standard names, then Open Graph properties, then Twitter names, then a
/// non-empty `charset` attribute. A tag sets at most one field.
pub fn classify_meta(name: &str, property: &str, charset: Option<&str>) -> Option<MetaField> {
    lookup(STANDARD_NAMES, name)
        .or_else(|| lookup(OPEN_GRAPH_PROPERTIES, property))
        .or_else(|| lookup(TWITTER_NAMES, name))
        .or_else(|| match charset {
            Some(c) if !c.is_empty() => Some(MetaField::Charset),
            _ => None,
        })
}

impl MetaField {
    /// Mutable access to the record field this variant names.
    pub fn slot<'a>(&self, meta: &'a mut MetadataRecord) -> &'a mut String {
        match self {
            MetaField::Description => &mut meta.description,
            MetaField::Keywords => &mut meta.keywords,
            MetaField::Robots => &mut meta.robots,
            MetaField::Viewport => &mut meta.viewport,
            MetaField::OgTitle => &mut meta.og_title,
            MetaField::OgDescription => &mut meta.og_description,
            MetaField::OgImage => &mut meta.og_image,
            MetaField::OgUrl => &mut meta.og_url,
            MetaField::OgType => &mut meta.og_type,
            MetaField::OgSiteName => &mut meta.og_site_name,
            MetaField::TwitterCard => &mut meta.twitter_card,
            MetaField::TwitterTitle => &mut meta.twitter_title,
            MetaField::TwitterDescription => &mut meta.twitter_description,
            MetaField::TwitterImage => &mut meta.twitter_image,
            MetaField::TwitterSite => &mut meta.twitter_site,
            MetaField::Charset => &mut meta.charset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn standard_names() {
        assert_eq!(
            classify_meta("description", "", None),
            Some(MetaField::Description)
        );
        assert_eq!(classify_meta("viewport", "", None), Some(MetaField::Viewport));
    }

    #[test]
    fn open_graph_uses_property_only() {
        assert_eq!(classify_meta("", "og:title", None), Some(MetaField::OgTitle));
        assert_eq!(classify_meta("og:title", "", None), None);
    }

    #[test]
    fn twitter_uses_name_only() {
        assert_eq!(
            classify_meta("twitter:card", "", None),
            Some(MetaField::TwitterCard)
        );
        assert_eq!(classify_meta("", "twitter:card", None), None);
    }

    #[test]
    fn standard_name_wins_over_property() {
        assert_eq!(
            classify_meta("description", "og:description", None),
            Some(MetaField::Description)
        );
    }

    #[test]
    fn charset_only_when_nothing_else_matches() {
        assert_eq!(classify_meta("", "", Some("utf-8")), Some(MetaField::Charset));
        assert_eq!(classify_meta("", "", Some("")), None);
        assert_eq!(
            classify_meta("robots", "", Some("utf-8")),
            Some(MetaField::Robots)
        );
    }

    #[test]
    fn unknown_tags_are_ignored() {
        assert_eq!(classify_meta("author", "article:author", None), None);
    }

    #[test]
    fn slot_points_at_matching_field() {
        let mut meta = MetadataRecord::default();
        *MetaField::OgSiteName.slot(&mut meta) = "Example".to_string();
        assert_eq!(meta.og_site_name, "Example");
    }
}
