//! Filename templates.
//!
//! A template is a format string with `{field}` placeholders, compiled once
//! when configuration is loaded. Numeric fields accept a zero-padding width
//! (`{season:02}`) and `{{`/`}}` produce literal braces. Each media kind has a
//! fixed set of fields; using a field outside that set is a template error.

use std::fmt;

use reelsort_common::{Error, Result};

use crate::media::MediaKind;

/// A substitutable template field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Year,
    Show,
    Name,
    Season,
    Episode,
    Quality,
    Codec,
    Group,
}

const MOVIE_FIELDS: &[Field] = &[
    Field::Title,
    Field::Year,
    Field::Quality,
    Field::Codec,
    Field::Group,
];

const EPISODE_FIELDS: &[Field] = &[
    Field::Show,
    Field::Name,
    Field::Season,
    Field::Episode,
    Field::Quality,
    Field::Codec,
    Field::Group,
];

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Year => "year",
            Field::Show => "show",
            Field::Name => "name",
            Field::Season => "season",
            Field::Episode => "episode",
            Field::Quality => "quality",
            Field::Codec => "codec",
            Field::Group => "group",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        [
            Field::Title,
            Field::Year,
            Field::Show,
            Field::Name,
            Field::Season,
            Field::Episode,
            Field::Quality,
            Field::Codec,
            Field::Group,
        ]
        .into_iter()
        .find(|field| field.as_str() == name)
    }

    /// Returns `true` for fields that render a number.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Field::Year | Field::Season | Field::Episode)
    }

    /// The fields a template for `kind` may use.
    pub fn allowed_for(kind: MediaKind) -> &'static [Field] {
        match kind {
            MediaKind::Movie => MOVIE_FIELDS,
            MediaKind::Episode => EPISODE_FIELDS,
            MediaKind::Subtitle => &[],
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The value a field takes for one media item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    /// `None` renders as the empty string.
    Number(Option<u32>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field { field: Field, width: Option<usize> },
}

/// A compiled filename template for one media kind.
///
/// ```
/// use reelsort::media::MediaKind;
/// use reelsort::rename::Template;
///
/// let template = Template::parse(MediaKind::Episode, "{show}/S{season:02}E{episode:02}").unwrap();
/// assert_eq!(template.as_str(), "{show}/S{season:02}E{episode:02}");
///
/// assert!(Template::parse(MediaKind::Movie, "{show}").is_err());
/// assert!(Template::parse(MediaKind::Movie, "{title").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    kind: MediaKind,
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Compile `text` as a template for `kind`.
    pub fn parse(kind: MediaKind, text: &str) -> Result<Self> {
        if kind == MediaKind::Subtitle {
            return Err(Error::Template("subtitles cannot be renamed".to_string()));
        }

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '}' => {
                    return Err(Error::Template(format!("unmatched '}}' in {text:?}")));
                }
                '{' => {
                    let mut placeholder = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some('{') | None => {
                                return Err(Error::Template(format!(
                                    "unclosed '{{' in {text:?}"
                                )));
                            }
                            Some(c) => placeholder.push(c),
                        }
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(parse_placeholder(kind, &placeholder)?);
                }
                c => literal.push(c),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            kind,
            source: text.to_string(),
            segments,
        })
    }

    /// The media kind this template renders.
    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    /// The template text as written in the configuration.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Fields referenced by the template, in order of appearance.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Field { field, .. } => Some(*field),
            Segment::Literal(_) => None,
        })
    }

    /// Substitute every field with the value returned by `lookup`.
    pub fn render(&self, lookup: impl Fn(Field) -> Value) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field { field, width } => match lookup(*field) {
                    Value::Text(text) => out.push_str(&text),
                    Value::Number(None) => {}
                    Value::Number(Some(n)) => match width {
                        Some(width) => out.push_str(&format!("{n:0width$}")),
                        None => out.push_str(&n.to_string()),
                    },
                },
            }
        }
        out
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn parse_placeholder(kind: MediaKind, placeholder: &str) -> Result<Segment> {
    let (name, format) = match placeholder.split_once(':') {
        Some((name, format)) => (name.trim(), Some(format.trim())),
        None => (placeholder.trim(), None),
    };

    let field = Field::from_name(name)
        .ok_or_else(|| Error::Template(format!("unknown field {{{name}}}")))?;
    if !Field::allowed_for(kind).contains(&field) {
        return Err(Error::Template(format!(
            "field {{{name}}} is not available for {kind} templates"
        )));
    }

    let width = match format {
        None => None,
        Some(_) if !field.is_numeric() => {
            return Err(Error::Template(format!(
                "field {{{name}}} is not numeric and cannot be padded"
            )));
        }
        Some(format) => {
            let digits = format.strip_prefix('0').unwrap_or(format);
            let width = digits
                .parse::<usize>()
                .map_err(|_| Error::Template(format!("invalid width {format:?} for {{{name}}}")))?;
            Some(width)
        }
    };

    Ok(Segment::Field { field, width })
}
