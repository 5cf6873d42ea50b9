//! Attribute classification.
//!
//! Every attribute mutation on an embedded-content element is classified into
//! presentational [`StyleEffect`]s (handed to the host's style sink) and at
//! most one [`FieldUpdate`] applied to the element. Each element kind has its
//! own rule table; the first rule naming the attribute wins and attributes
//! with no rule fall through to the base element rules.

use core::fmt;

use crate::element::ElementKind;

// ============================================================================
// Attribute Names
// ============================================================================

/// Attribute names the classifier knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttrName {
    /// `align`
    Align,
    /// `alt`
    Alt,
    /// `archive`
    Archive,
    /// `border`
    Border,
    /// `classid`
    ClassId,
    /// `code`
    Code,
    /// `codebase`
    CodeBase,
    /// `data`
    Data,
    /// `height`
    Height,
    /// `hidden`
    Hidden,
    /// `hspace`
    Hspace,
    /// `id`
    Id,
    /// `mayscript`
    MayScript,
    /// `name`
    Name,
    /// `object`
    Object,
    /// `pluginpage` and `pluginspage`
    PluginPage,
    /// `src`
    Src,
    /// `type`
    Type,
    /// `usemap`
    UseMap,
    /// `valign`
    Valign,
    /// `value`
    Value,
    /// `valuetype`
    ValueType,
    /// `vspace`
    Vspace,
    /// `width`
    Width,
}

const ATTRIBUTE_NAMES: &[(&str, AttrName)] = &[
    ("align", AttrName::Align),
    ("alt", AttrName::Alt),
    ("archive", AttrName::Archive),
    ("border", AttrName::Border),
    ("classid", AttrName::ClassId),
    ("code", AttrName::Code),
    ("codebase", AttrName::CodeBase),
    ("data", AttrName::Data),
    ("height", AttrName::Height),
    ("hidden", AttrName::Hidden),
    ("hspace", AttrName::Hspace),
    ("id", AttrName::Id),
    ("mayscript", AttrName::MayScript),
    ("name", AttrName::Name),
    ("object", AttrName::Object),
    ("pluginpage", AttrName::PluginPage),
    ("pluginspage", AttrName::PluginPage),
    ("src", AttrName::Src),
    ("type", AttrName::Type),
    ("usemap", AttrName::UseMap),
    ("valign", AttrName::Valign),
    ("value", AttrName::Value),
    ("valuetype", AttrName::ValueType),
    ("vspace", AttrName::Vspace),
    ("width", AttrName::Width),
];

impl AttrName {
    /// Looks up an attribute name, ignoring ASCII case.
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        ATTRIBUTE_NAMES
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(name))
            .map(|&(_, attr)| attr)
    }
}

// ============================================================================
// Style Effects
// ============================================================================

/// CSS properties attribute mapping can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum CssProperty {
    Width,
    Height,
    MarginTop,
    MarginBottom,
    MarginLeft,
    MarginRight,
    BorderWidth,
    BorderTopStyle,
    BorderRightStyle,
    BorderBottomStyle,
    BorderLeftStyle,
    VerticalAlign,
    Float,
}

impl CssProperty {
    /// The CSS property name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Width => "width",
            Self::Height => "height",
            Self::MarginTop => "margin-top",
            Self::MarginBottom => "margin-bottom",
            Self::MarginLeft => "margin-left",
            Self::MarginRight => "margin-right",
            Self::BorderWidth => "border-width",
            Self::BorderTopStyle => "border-top-style",
            Self::BorderRightStyle => "border-right-style",
            Self::BorderBottomStyle => "border-bottom-style",
            Self::BorderLeftStyle => "border-left-style",
            Self::VerticalAlign => "vertical-align",
            Self::Float => "float",
        }
    }
}

/// A presentational length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    /// Absolute length in CSS pixels.
    Px(f32),
    /// Percentage of the containing block.
    Percent(f32),
}

impl Length {
    /// Parses an HTML dimension attribute leniently.
    ///
    /// Leading whitespace is skipped and the longest numeric prefix is used; a
    /// `%` directly after it makes the length a percentage. Values without a
    /// numeric prefix produce nothing.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim_start();
        let mut seen_dot = false;
        let end = value
            .char_indices()
            .find(|&(_, c)| {
                if c == '.' && !seen_dot {
                    seen_dot = true;
                    false
                } else {
                    !c.is_ascii_digit()
                }
            })
            .map_or(value.len(), |(i, _)| i);
        let number: f32 = value[..end].parse().ok()?;
        if value[end..].starts_with('%') {
            Some(Self::Percent(number))
        } else {
            Some(Self::Px(number))
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(v) => write!(f, "{v}px"),
            Self::Percent(v) => write!(f, "{v}%"),
        }
    }
}

/// Keyword values attribute mapping can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Keyword {
    Solid,
    Left,
    Right,
    Top,
    Middle,
    Bottom,
    TextTop,
    TextBottom,
    Baseline,
    Sub,
    Super,
}

impl Keyword {
    /// Parses a `vertical-align` keyword, ignoring ASCII case.
    #[must_use]
    pub fn parse_vertical_align(value: &str) -> Option<Self> {
        const KEYWORDS: &[(&str, Keyword)] = &[
            ("top", Keyword::Top),
            ("middle", Keyword::Middle),
            ("bottom", Keyword::Bottom),
            ("text-top", Keyword::TextTop),
            ("text-bottom", Keyword::TextBottom),
            ("baseline", Keyword::Baseline),
            ("sub", Keyword::Sub),
            ("super", Keyword::Super),
        ];
        let value = value.trim();
        KEYWORDS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(value))
            .map(|&(_, keyword)| keyword)
    }
}

/// Value half of a style effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CssValue {
    /// A length.
    Length(Length),
    /// A keyword.
    Keyword(Keyword),
}

/// One presentational property produced by an attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleEffect {
    /// Target property.
    pub property: CssProperty,
    /// Value to assign.
    pub value: CssValue,
}

impl StyleEffect {
    /// A length-valued effect.
    #[must_use]
    pub const fn length(property: CssProperty, length: Length) -> Self {
        Self {
            property,
            value: CssValue::Length(length),
        }
    }

    /// A keyword-valued effect.
    #[must_use]
    pub const fn keyword(property: CssProperty, keyword: Keyword) -> Self {
        Self {
            property,
            value: CssValue::Keyword(keyword),
        }
    }
}

// ============================================================================
// Classification
// ============================================================================

/// Param-specific fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamField {
    /// `name`
    Name,
    /// `value`
    Value,
    /// `type`
    Type,
    /// `valuetype`
    ValueType,
    /// `id`, which doubles as the name in XHTML documents.
    Id,
}

/// Semantic change an attribute mutation makes to its element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    /// Nothing beyond storing the raw attribute.
    None,
    /// Normalized MIME type.
    ServiceType(String),
    /// Unresolved content URL; resolution needs the document base.
    Url(String),
    /// `name`, mirrored into the name domain.
    Name(String),
    /// `id`, mirrored into the id domain.
    Id(String),
    /// `id` handled by the base element rules only.
    ElementId(String),
    /// `classid`.
    ClassId(String),
    /// Plugin download page.
    PluginPage(String),
    /// A param field.
    Param(ParamField, String),
}

/// Result of classifying one attribute mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Style effects in application order.
    pub effects: Vec<StyleEffect>,
    /// Semantic change to apply.
    pub update: FieldUpdate,
}

impl Classification {
    const fn update(update: FieldUpdate) -> Self {
        Self {
            effects: Vec::new(),
            update,
        }
    }

    const fn effects(effects: Vec<StyleEffect>) -> Self {
        Self {
            effects,
            update: FieldUpdate::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Handler {
    ServiceType,
    Url,
    Name,
    Id,
    ClassId,
    PluginPage,
    Length(CssProperty),
    VerticalSpace,
    HorizontalSpace,
    Align,
    VerticalAlign,
    Border,
    Hidden,
    Inert,
    Param(ParamField),
}

const OBJECT_RULES: &[(AttrName, Handler)] = &[
    (AttrName::Type, Handler::ServiceType),
    (AttrName::Data, Handler::Url),
    (AttrName::Width, Handler::Length(CssProperty::Width)),
    (AttrName::Height, Handler::Length(CssProperty::Height)),
    (AttrName::Vspace, Handler::VerticalSpace),
    (AttrName::Hspace, Handler::HorizontalSpace),
    (AttrName::Align, Handler::Align),
    (AttrName::ClassId, Handler::ClassId),
    (AttrName::Name, Handler::Name),
    (AttrName::Id, Handler::Id),
];

const EMBED_RULES: &[(AttrName, Handler)] = &[
    (AttrName::Type, Handler::ServiceType),
    (AttrName::Code, Handler::Url),
    (AttrName::Src, Handler::Url),
    (AttrName::Width, Handler::Length(CssProperty::Width)),
    (AttrName::Height, Handler::Length(CssProperty::Height)),
    (AttrName::Border, Handler::Border),
    (AttrName::Vspace, Handler::VerticalSpace),
    (AttrName::Hspace, Handler::HorizontalSpace),
    (AttrName::Align, Handler::Align),
    (AttrName::Valign, Handler::VerticalAlign),
    (AttrName::PluginPage, Handler::PluginPage),
    (AttrName::Hidden, Handler::Hidden),
    (AttrName::Name, Handler::Name),
];

const APPLET_RULES: &[(AttrName, Handler)] = &[
    (AttrName::Code, Handler::Url),
    (AttrName::Alt, Handler::Inert),
    (AttrName::Archive, Handler::Inert),
    (AttrName::CodeBase, Handler::Inert),
    (AttrName::MayScript, Handler::Inert),
    (AttrName::Object, Handler::Inert),
    (AttrName::Width, Handler::Length(CssProperty::Width)),
    (AttrName::Height, Handler::Length(CssProperty::Height)),
    (AttrName::Vspace, Handler::VerticalSpace),
    (AttrName::Hspace, Handler::HorizontalSpace),
    (AttrName::Align, Handler::Align),
    (AttrName::Name, Handler::Name),
    (AttrName::Id, Handler::Id),
];

const PARAM_RULES: &[(AttrName, Handler)] = &[
    (AttrName::Id, Handler::Param(ParamField::Id)),
    (AttrName::Name, Handler::Param(ParamField::Name)),
    (AttrName::Value, Handler::Param(ParamField::Value)),
    (AttrName::Type, Handler::Param(ParamField::Type)),
    (AttrName::ValueType, Handler::Param(ParamField::ValueType)),
];

const fn rules(kind: ElementKind) -> &'static [(AttrName, Handler)] {
    match kind {
        ElementKind::Object => OBJECT_RULES,
        ElementKind::Embed => EMBED_RULES,
        ElementKind::Applet => APPLET_RULES,
        ElementKind::Param => PARAM_RULES,
    }
}

/// Classifies one attribute mutation for an element of `kind`.
#[must_use]
pub fn classify(kind: ElementKind, name: &str, value: &str) -> Classification {
    let Some(attr) = AttrName::lookup(name) else {
        return Classification::update(FieldUpdate::None);
    };
    match rule(kind, attr) {
        Some(handler) => apply_handler(handler, value),
        None => classify_base(attr, value),
    }
}

fn rule(kind: ElementKind, attr: AttrName) -> Option<Handler> {
    rules(kind)
        .iter()
        .find(|(candidate, _)| *candidate == attr)
        .map(|&(_, handler)| handler)
}

/// Returns the attribute if it maps to style declarations on `kind`.
///
/// Such an attribute owns its declarations: every mutation replaces what its
/// previous value produced, and an empty effect list (an unparseable value or
/// a removal) clears them.
#[must_use]
pub fn style_attribute(kind: ElementKind, name: &str) -> Option<AttrName> {
    let attr = AttrName::lookup(name)?;
    rule(kind, attr)
        .is_some_and(|handler| {
            matches!(
                handler,
                Handler::Length(_)
                    | Handler::VerticalSpace
                    | Handler::HorizontalSpace
                    | Handler::Align
                    | Handler::VerticalAlign
                    | Handler::Border
                    | Handler::Hidden
            )
        })
        .then_some(attr)
}

fn classify_base(attr: AttrName, value: &str) -> Classification {
    match attr {
        AttrName::Id => Classification::update(FieldUpdate::ElementId(value.to_owned())),
        _ => Classification::update(FieldUpdate::None),
    }
}

fn apply_handler(handler: Handler, value: &str) -> Classification {
    match handler {
        Handler::ServiceType => {
            Classification::update(FieldUpdate::ServiceType(normalize_service_type(value)))
        }
        Handler::Url => Classification::update(FieldUpdate::Url(value.to_owned())),
        Handler::Name => Classification::update(FieldUpdate::Name(value.to_owned())),
        Handler::Id => Classification::update(FieldUpdate::Id(value.to_owned())),
        Handler::ClassId => Classification::update(FieldUpdate::ClassId(value.to_owned())),
        Handler::PluginPage => Classification::update(FieldUpdate::PluginPage(value.to_owned())),
        Handler::Param(field) => Classification::update(FieldUpdate::Param(field, value.to_owned())),
        Handler::Inert => Classification::update(FieldUpdate::None),
        Handler::Length(property) => Classification::effects(
            Length::parse(value)
                .map(|length| StyleEffect::length(property, length))
                .into_iter()
                .collect(),
        ),
        Handler::VerticalSpace => Classification::effects(lengths(
            value,
            &[CssProperty::MarginTop, CssProperty::MarginBottom],
        )),
        Handler::HorizontalSpace => Classification::effects(lengths(
            value,
            &[CssProperty::MarginLeft, CssProperty::MarginRight],
        )),
        Handler::Align => Classification::effects(alignment(value).into_iter().collect()),
        Handler::VerticalAlign => Classification::effects(
            Keyword::parse_vertical_align(value)
                .map(|keyword| StyleEffect::keyword(CssProperty::VerticalAlign, keyword))
                .into_iter()
                .collect(),
        ),
        Handler::Border => Classification::effects(border(value)),
        Handler::Hidden => Classification::effects(hidden(value)),
    }
}

/// Lowercases a `type` attribute and strips any parameters after `;`.
#[must_use]
pub fn normalize_service_type(value: &str) -> String {
    let lowered = value.to_lowercase();
    match lowered.find(';') {
        Some(pos) => lowered[..pos].to_owned(),
        None => lowered,
    }
}

fn lengths(value: &str, properties: &[CssProperty]) -> Vec<StyleEffect> {
    Length::parse(value)
        .map(|length| {
            properties
                .iter()
                .map(|&property| StyleEffect::length(property, length))
                .collect()
        })
        .unwrap_or_default()
}

fn alignment(value: &str) -> Option<StyleEffect> {
    let value = value.trim().to_ascii_lowercase();
    let (property, keyword) = match value.as_str() {
        "left" => (CssProperty::Float, Keyword::Left),
        "right" => (CssProperty::Float, Keyword::Right),
        "top" => (CssProperty::VerticalAlign, Keyword::Top),
        "middle" | "absmiddle" | "center" => (CssProperty::VerticalAlign, Keyword::Middle),
        "bottom" | "baseline" => (CssProperty::VerticalAlign, Keyword::Baseline),
        "absbottom" => (CssProperty::VerticalAlign, Keyword::Bottom),
        "texttop" => (CssProperty::VerticalAlign, Keyword::TextTop),
        _ => return None,
    };
    Some(StyleEffect::keyword(property, keyword))
}

fn border(value: &str) -> Vec<StyleEffect> {
    let Some(width) = Length::parse(value) else {
        return Vec::new();
    };
    vec![
        StyleEffect::length(CssProperty::BorderWidth, width),
        StyleEffect::keyword(CssProperty::BorderTopStyle, Keyword::Solid),
        StyleEffect::keyword(CssProperty::BorderRightStyle, Keyword::Solid),
        StyleEffect::keyword(CssProperty::BorderBottomStyle, Keyword::Solid),
        StyleEffect::keyword(CssProperty::BorderLeftStyle, Keyword::Solid),
    ]
}

fn hidden(value: &str) -> Vec<StyleEffect> {
    if value.eq_ignore_ascii_case("yes") || value.eq_ignore_ascii_case("true") {
        vec![
            StyleEffect::length(CssProperty::Width, Length::Px(0.0)),
            StyleEffect::length(CssProperty::Height, Length::Px(0.0)),
        ]
    } else {
        Vec::new()
    }
}

/// Whether an attribute holds a URL, for serializers and link rewriters.
///
/// `param_name` is the `name` of the param when `kind` is
/// [`ElementKind::Param`].
#[must_use]
pub fn is_url_attribute(kind: ElementKind, name: &str, value: &str, param_name: &str) -> bool {
    match (kind, AttrName::lookup(name)) {
        (ElementKind::Object, Some(AttrName::Data)) | (ElementKind::Embed, Some(AttrName::Src)) => {
            true
        }
        (ElementKind::Object, Some(AttrName::UseMap)) => !value.starts_with('#'),
        (ElementKind::Param, Some(AttrName::Value)) => ["src", "movie", "data"]
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(param_name)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_ignores_case() {
        assert_eq!(AttrName::lookup("DATA"), Some(AttrName::Data));
        assert_eq!(AttrName::lookup("PluginsPage"), Some(AttrName::PluginPage));
        assert_eq!(AttrName::lookup("onclick"), None);
    }

    #[test]
    fn test_type_is_normalized() {
        let result = classify(
            ElementKind::Object,
            "type",
            "Application/X-Shockwave-Flash; charset=utf-8",
        );
        assert_eq!(
            result.update,
            FieldUpdate::ServiceType("application/x-shockwave-flash".into())
        );
        assert!(result.effects.is_empty());
    }

    #[test]
    fn test_url_attributes_per_kind() {
        assert_eq!(
            classify(ElementKind::Object, "data", "movie.swf").update,
            FieldUpdate::Url("movie.swf".into())
        );
        assert_eq!(
            classify(ElementKind::Embed, "src", "movie.swf").update,
            FieldUpdate::Url("movie.swf".into())
        );
        assert_eq!(
            classify(ElementKind::Embed, "code", "movie.swf").update,
            FieldUpdate::Url("movie.swf".into())
        );
        assert_eq!(
            classify(ElementKind::Applet, "code", "Main.class").update,
            FieldUpdate::Url("Main.class".into())
        );
        // `src` on an object is not a content URL.
        assert_eq!(
            classify(ElementKind::Object, "src", "movie.swf").update,
            FieldUpdate::None
        );
    }

    #[test]
    fn test_embed_border_expands() {
        let result = classify(ElementKind::Embed, "border", "2");
        assert_eq!(
            result.effects,
            [
                StyleEffect::length(CssProperty::BorderWidth, Length::Px(2.0)),
                StyleEffect::keyword(CssProperty::BorderTopStyle, Keyword::Solid),
                StyleEffect::keyword(CssProperty::BorderRightStyle, Keyword::Solid),
                StyleEffect::keyword(CssProperty::BorderBottomStyle, Keyword::Solid),
                StyleEffect::keyword(CssProperty::BorderLeftStyle, Keyword::Solid),
            ]
        );
        // Objects have no border rule.
        assert!(classify(ElementKind::Object, "border", "2").effects.is_empty());
    }

    #[test]
    fn test_embed_hidden() {
        let zero = [
            StyleEffect::length(CssProperty::Width, Length::Px(0.0)),
            StyleEffect::length(CssProperty::Height, Length::Px(0.0)),
        ];
        assert_eq!(classify(ElementKind::Embed, "hidden", "YES").effects, zero);
        assert_eq!(classify(ElementKind::Embed, "hidden", "true").effects, zero);
        assert!(classify(ElementKind::Embed, "hidden", "no").effects.is_empty());
        assert!(classify(ElementKind::Embed, "hidden", "").effects.is_empty());
    }

    #[test]
    fn test_spacing_and_dimensions() {
        assert_eq!(
            classify(ElementKind::Applet, "vspace", "4").effects,
            [
                StyleEffect::length(CssProperty::MarginTop, Length::Px(4.0)),
                StyleEffect::length(CssProperty::MarginBottom, Length::Px(4.0)),
            ]
        );
        assert_eq!(
            classify(ElementKind::Object, "width", "50%").effects,
            [StyleEffect::length(CssProperty::Width, Length::Percent(50.0))]
        );
        assert!(classify(ElementKind::Object, "height", "auto").effects.is_empty());
    }

    #[test]
    fn test_alignment() {
        assert_eq!(
            classify(ElementKind::Object, "align", "Left").effects,
            [StyleEffect::keyword(CssProperty::Float, Keyword::Left)]
        );
        assert_eq!(
            classify(ElementKind::Embed, "align", "absmiddle").effects,
            [StyleEffect::keyword(CssProperty::VerticalAlign, Keyword::Middle)]
        );
        assert_eq!(
            classify(ElementKind::Embed, "valign", "text-top").effects,
            [StyleEffect::keyword(CssProperty::VerticalAlign, Keyword::TextTop)]
        );
        assert!(classify(ElementKind::Object, "align", "sideways").effects.is_empty());
    }

    #[test]
    fn test_id_routing() {
        assert_eq!(
            classify(ElementKind::Object, "id", "a").update,
            FieldUpdate::Id("a".into())
        );
        assert_eq!(
            classify(ElementKind::Embed, "id", "a").update,
            FieldUpdate::ElementId("a".into())
        );
        assert_eq!(
            classify(ElementKind::Param, "id", "a").update,
            FieldUpdate::Param(ParamField::Id, "a".into())
        );
    }

    #[test]
    fn test_style_attributes_per_kind() {
        assert_eq!(
            style_attribute(ElementKind::Embed, "BORDER"),
            Some(AttrName::Border)
        );
        assert_eq!(
            style_attribute(ElementKind::Embed, "hidden"),
            Some(AttrName::Hidden)
        );
        assert_eq!(
            style_attribute(ElementKind::Applet, "vspace"),
            Some(AttrName::Vspace)
        );
        assert_eq!(style_attribute(ElementKind::Object, "border"), None);
        assert_eq!(style_attribute(ElementKind::Object, "data"), None);
        assert_eq!(style_attribute(ElementKind::Param, "width"), None);
        assert_eq!(style_attribute(ElementKind::Embed, "bgcolor"), None);
    }

    #[test]
    fn test_applet_inert_attributes() {
        let result = classify(ElementKind::Applet, "archive", "lib.jar");
        assert_eq!(result.update, FieldUpdate::None);
        assert!(result.effects.is_empty());
    }

    #[test]
    fn test_length_parse() {
        assert_eq!(Length::parse("  12px"), Some(Length::Px(12.0)));
        assert_eq!(Length::parse("1.5"), Some(Length::Px(1.5)));
        assert_eq!(Length::parse("33%"), Some(Length::Percent(33.0)));
        assert_eq!(Length::parse("1.2.3"), Some(Length::Px(1.2)));
        assert_eq!(Length::parse("px"), None);
        assert_eq!(Length::parse(""), None);
        assert_eq!(Length::Px(3.0).to_string(), "3px");
    }

    #[test]
    fn test_url_attribute_predicate() {
        assert!(is_url_attribute(ElementKind::Object, "data", "x", ""));
        assert!(is_url_attribute(ElementKind::Object, "usemap", "map.html", ""));
        assert!(!is_url_attribute(ElementKind::Object, "usemap", "#map", ""));
        assert!(is_url_attribute(ElementKind::Embed, "src", "x", ""));
        assert!(!is_url_attribute(ElementKind::Embed, "data", "x", ""));
        assert!(is_url_attribute(ElementKind::Param, "value", "x", "Movie"));
        assert!(!is_url_attribute(ElementKind::Param, "value", "x", "quality"));
        assert!(!is_url_attribute(ElementKind::Applet, "code", "x", ""));
    }
}
