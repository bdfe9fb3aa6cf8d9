//! Structured locale identifier for subtitle languages.
//!
//! Only the shape of the tag is validated (BCP-47 language, script and region
//! subtags); no registry lookup is performed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// A language tag such as `en`, `pt-BR` or `zh-Hant-TW`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageTag {
    language: String,
    script: Option<String>,
    region: Option<String>,
}

impl LanguageTag {
    /// Parse a tag, accepting `-` or `_` as subtag separator in any case.
    pub fn parse(input: &str) -> Result<Self, Error> {
        let mut subtags = input.split(['-', '_']);

        let language = match subtags.next() {
            Some(s) if (2..=3).contains(&s.len()) && s.chars().all(|c| c.is_ascii_alphabetic()) => {
                s.to_ascii_lowercase()
            }
            _ => return Err(Error::parse(format!("invalid language tag: {input:?}"))),
        };

        let mut script = None;
        let mut region = None;
        for subtag in subtags {
            if script.is_none()
                && region.is_none()
                && subtag.len() == 4
                && subtag.chars().all(|c| c.is_ascii_alphabetic())
            {
                let lower = subtag.to_ascii_lowercase();
                let mut chars = lower.chars();
                script = chars
                    .next()
                    .map(|first| first.to_ascii_uppercase().to_string() + chars.as_str());
            } else if region.is_none() && is_region(subtag) {
                region = Some(subtag.to_ascii_uppercase());
            } else {
                return Err(Error::parse(format!("invalid language tag: {input:?}")));
            }
        }

        Ok(Self {
            language,
            script,
            region,
        })
    }

    /// The lowercase primary language subtag.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The titlecase script subtag, if present.
    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    /// The uppercase region subtag, if present.
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }
}

fn is_region(subtag: &str) -> bool {
    (subtag.len() == 2 && subtag.chars().all(|c| c.is_ascii_alphabetic()))
        || (subtag.len() == 3 && subtag.chars().all(|c| c.is_ascii_digit()))
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.language)?;
        if let Some(script) = &self.script {
            write!(f, "-{script}")?;
        }
        if let Some(region) = &self.region {
            write!(f, "-{region}")?;
        }
        Ok(())
    }
}

impl FromStr for LanguageTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for LanguageTag {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LanguageTag> for String {
    fn from(tag: LanguageTag) -> Self {
        tag.to_string()
    }
}
