//! Typed element attributes.
//!
//! Attributes are an enumerated set with one constructor per recognized
//! attribute. Custom data lives under the `data-` namespace explicitly;
//! there is no generic string-keyed setter, so a typo'd key is a compile
//! error rather than a silently assigned property.

/// A recognized element attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attr {
    /// `id` attribute.
    Id(String),
    /// `class` attribute.
    Class(String),
    /// `src` attribute (scripts, images).
    Src(String),
    /// `href` attribute (links).
    Href(String),
    /// `rel` attribute (links).
    Rel(String),
    /// `type` attribute.
    Type(String),
    /// `data-*` attribute. `name` is the part after the `data-` prefix.
    Data {
        /// Suffix after `data-`.
        name: String,
        /// Attribute value.
        value: String,
    },
}

impl Attr {
    /// Convenience constructor for `id`.
    #[must_use]
    pub fn id(value: impl Into<String>) -> Self {
        Self::Id(value.into())
    }

    /// Convenience constructor for `class`.
    #[must_use]
    pub fn class(value: impl Into<String>) -> Self {
        Self::Class(value.into())
    }

    /// Convenience constructor for `src`.
    #[must_use]
    pub fn src(value: impl Into<String>) -> Self {
        Self::Src(value.into())
    }

    /// Convenience constructor for `data-*`.
    #[must_use]
    pub fn data(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Data {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Serialized attribute name.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Id(_) => "id".to_owned(),
            Self::Class(_) => "class".to_owned(),
            Self::Src(_) => "src".to_owned(),
            Self::Href(_) => "href".to_owned(),
            Self::Rel(_) => "rel".to_owned(),
            Self::Type(_) => "type".to_owned(),
            Self::Data { name, .. } => format!("data-{name}"),
        }
    }

    /// Attribute value.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Id(v)
            | Self::Class(v)
            | Self::Src(v)
            | Self::Href(v)
            | Self::Rel(v)
            | Self::Type(v)
            | Self::Data { value: v, .. } => v,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_plain_attribute_names() {
        assert_eq!(Attr::id("x").name(), "id");
        assert_eq!(Attr::class("x").name(), "class");
        assert_eq!(Attr::src("x").name(), "src");
        assert_eq!(Attr::Rel("stylesheet".to_owned()).name(), "rel");
    }

    #[test]
    fn test_data_attribute_name_is_prefixed() {
        let attr = Attr::data("demo-id", "3");
        assert_eq!(attr.name(), "data-demo-id");
        assert_eq!(attr.value(), "3");
    }

    #[test]
    fn test_value() {
        assert_eq!(Attr::id("main").value(), "main");
        assert_eq!(Attr::Href("/a".to_owned()).value(), "/a");
    }
}
