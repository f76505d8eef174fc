//! The analysis data model.
//!
//! The shapes here mirror the JSON structure the model is instructed to
//! produce: a topic summary, a list of long-tail keywords with heat
//! scores, and a batch of generated article titles. All values are
//! request-scoped; nothing is persisted.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Source platform for a keyword.
///
/// The model is asked for exactly `WeChat`, `Baidu`, `Zhihu`, or `Other`,
/// but does not reliably comply; any unrecognized label deserializes to
/// [`Platform::Other`] rather than failing or passing through raw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    WeChat,
    Baidu,
    Zhihu,
    #[default]
    Other,
}

impl Platform {
    /// Normalize a platform label. Only exact matches for the three named
    /// platforms are recognized.
    pub fn from_label(label: &str) -> Self {
        match label {
            "WeChat" => Self::WeChat,
            "Baidu" => Self::Baidu,
            "Zhihu" => Self::Zhihu,
            _ => Self::Other,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::WeChat => "WeChat",
            Self::Baidu => "Baidu",
            Self::Zhihu => "Zhihu",
            Self::Other => "Other",
        }
    }
}

impl Serialize for Platform {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Platform {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from_label(&label))
    }
}

/// Trend direction for a keyword's heat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Trend {
    Up,
    Down,
    #[default]
    Stable,
}

impl Trend {
    pub fn from_label(label: &str) -> Self {
        match label {
            "up" => Self::Up,
            "down" => Self::Down,
            _ => Self::Stable,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Stable => "stable",
        }
    }
}

impl Serialize for Trend {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Trend {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from_label(&label))
    }
}

/// One long-tail keyword with its estimated heat.
///
/// The heat score is documented as 0-100 by the producer but passed
/// through exactly as the model emitted it; no re-validation happens here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct KeywordItem {
    pub keyword: String,
    #[serde(rename = "heatScore")]
    pub heat_score: i64,
    pub platform: Platform,
    pub trend: Trend,
    pub reasoning: String,
}

/// The parsed marketing analysis for one topic.
///
/// Missing `topic` / `summary` default to the empty string; missing
/// sequences default to empty. Keyword order is preserved as produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisResult {
    pub topic: String,
    pub summary: String,
    pub keywords: Vec<KeywordItem>,
    #[serde(rename = "generatedTitles")]
    pub generated_titles: Vec<String>,
}

/// A grounding citation surfaced by the upstream model call, when the
/// provider supports them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceReference {
    pub title: String,
    pub uri: String,
}
