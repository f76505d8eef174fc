//! Tolerant extraction of an [`AnalysisResult`] from raw model text.
//!
//! Models do not reliably honor "return pure JSON" instructions, so the
//! extractor runs an ordered chain of candidate selectors before parsing:
//! a ```json fenced block, then any generic fenced block, then the raw
//! text verbatim. The chain only selects text; it never fails mid-search.
//! New model-output quirks get a new strategy here, not changes at the
//! call sites.

use crate::analysis::{AnalysisResult, SourceReference};
use crate::error::{Error, Result};

/// A parsed analysis plus whatever grounding citations the upstream model
/// call surfaced (empty for providers without citation metadata).
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub result: AnalysisResult,
    pub sources: Vec<SourceReference>,
}

/// One candidate selector: given the raw text, optionally yield the text
/// to parse as JSON.
type Strategy = fn(&str) -> Option<String>;

/// Tried in order; the last strategy always yields, so selection cannot
/// come up empty.
const STRATEGIES: &[Strategy] = &[json_fenced_block, generic_fenced_block, verbatim];

/// Interior of the first ```json fenced block, if any.
fn json_fenced_block(text: &str) -> Option<String> {
    fenced_interior(text, "```json")
}

/// Interior of the first generic ``` fenced block, if any.
fn generic_fenced_block(text: &str) -> Option<String> {
    fenced_interior(text, "```")
}

fn verbatim(text: &str) -> Option<String> {
    Some(text.to_string())
}

fn fenced_interior(text: &str, opening: &str) -> Option<String> {
    let start = text.find(opening)? + opening.len();
    let rest = &text[start..];
    let end = rest.find("```")?;
    Some(rest[..end].to_string())
}

/// Extract and validate an analysis from raw model output.
///
/// `sources` are passed through untouched; deduplication is not applied.
pub fn extract(text: &str, sources: Vec<SourceReference>) -> Result<Extraction> {
    let candidate = STRATEGIES
        .iter()
        .find_map(|strategy| strategy(text))
        .unwrap_or_default();

    let result: AnalysisResult =
        serde_json::from_str(candidate.trim()).map_err(|_| Error::malformed(candidate.trim()))?;

    Ok(Extraction { result, sources })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Platform, Trend};

    const INNER: &str = r#"{"topic":"AI工具","summary":"热","keywords":[{"keyword":"AI写作","heatScore":88,"platform":"Zhihu","trend":"up","reasoning":"x"}],"generatedTitles":["t1"]}"#;

    #[test]
    fn test_extracts_from_json_fence_with_preamble() {
        let raw = format!("Thinking...\n```json\n{INNER}\n```");
        let extraction = extract(&raw, Vec::new()).unwrap();
        let result = extraction.result;

        assert_eq!(result.topic, "AI工具");
        assert_eq!(result.summary, "热");
        assert_eq!(result.keywords.len(), 1);
        assert_eq!(result.keywords[0].keyword, "AI写作");
        assert_eq!(result.keywords[0].heat_score, 88);
        assert_eq!(result.keywords[0].platform, Platform::Zhihu);
        assert_eq!(result.keywords[0].trend, Trend::Up);
        assert_eq!(result.keywords[0].reasoning, "x");
        assert_eq!(result.generated_titles, vec!["t1"]);
    }

    #[test]
    fn test_fenced_and_bare_inputs_extract_identically() {
        let fenced = format!("```json\n{INNER}\n```");
        let from_fenced = extract(&fenced, Vec::new()).unwrap();
        let from_bare = extract(INNER, Vec::new()).unwrap();
        assert_eq!(from_fenced, from_bare);
    }

    #[test]
    fn test_generic_fence_fallback() {
        let raw = format!("```\n{INNER}\n```");
        let extraction = extract(&raw, Vec::new()).unwrap();
        assert_eq!(extraction.result.topic, "AI工具");
    }

    #[test]
    fn test_unknown_platform_normalized_to_other() {
        let raw = r#"{"keywords":[{"keyword":"k","heatScore":10,"platform":"Weibo","trend":"down","reasoning":"r"}]}"#;
        let extraction = extract(raw, Vec::new()).unwrap();
        assert_eq!(extraction.result.keywords[0].platform, Platform::Other);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let raw = r#"{"keywords":[]}"#;
        let extraction = extract(raw, Vec::new()).unwrap();
        assert_eq!(extraction.result.topic, "");
        assert_eq!(extraction.result.summary, "");
        assert!(extraction.result.generated_titles.is_empty());
    }

    #[test]
    fn test_plain_prose_is_malformed() {
        let err = extract("抱歉，我无法完成这个请求。", Vec::new()).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse { .. }));
    }

    #[test]
    fn test_empty_input_is_malformed() {
        let err = extract("", Vec::new()).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse { .. }));
    }

    #[test]
    fn test_malformed_error_preview_is_bounded() {
        let long_prose = "分析结果如下。".repeat(500);
        let err = extract(&long_prose, Vec::new()).unwrap_err();
        match err {
            Error::MalformedResponse { preview } => {
                assert!(preview.chars().count() <= 201);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unclosed_fence_falls_through_to_verbatim() {
        // An opening fence with no close must not abort the search; the
        // verbatim strategy still runs (and fails to parse here).
        let err = extract("```json\n{\"topic\":", Vec::new()).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse { .. }));
    }

    #[test]
    fn test_sources_passed_through() {
        let sources = vec![
            SourceReference {
                title: "trend report".into(),
                uri: "https://example.com/a".into(),
            },
            SourceReference {
                title: "trend report".into(),
                uri: "https://example.com/a".into(),
            },
        ];
        let extraction = extract(INNER, sources.clone()).unwrap();
        // Pass-through, including duplicates.
        assert_eq!(extraction.sources, sources);
    }
}
