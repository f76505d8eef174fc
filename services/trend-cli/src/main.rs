//! TrendBurst CLI - submit a topic to the gateway and print the analysis.
//!
//! The gateway returns raw model text; parsing happens here, on the
//! consumer side, through `trend_common::extract`. Any failure collapses
//! into a single user-displayable message.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::time::Duration;
use trend_common::analysis::{AnalysisResult, KeywordItem, SourceReference};
use trend_common::extract;

/// How many keywords the ranked list shows.
const TOP_KEYWORDS: usize = 10;

#[derive(Parser)]
#[command(name = "trend", version, about = "AI marketing analysis for a topic")]
struct Cli {
    /// Topic to analyze, e.g. "AI工具"
    topic: String,

    /// Gateway base URL
    #[arg(long, default_value = "http://127.0.0.1:8787")]
    gateway: String,
}

/// Gateway response envelope: `text` on success, `error` otherwise.
#[derive(Debug, Deserialize)]
struct GatewayResponse {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli).await {
        eprintln!("分析失败: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let topic = cli.topic.trim();
    if topic.is_empty() {
        anyhow::bail!("topic must not be empty");
    }

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(120))
        .build()
        .context("failed to build HTTP client")?;

    let url = format!("{}/api/analyze", cli.gateway.trim_end_matches('/'));
    let response = client
        .post(&url)
        .json(&serde_json::json!({ "topic": topic }))
        .send()
        .await
        .with_context(|| format!("gateway unreachable at {url}"))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .context("failed to read gateway response")?;

    let envelope: GatewayResponse = serde_json::from_str(&body)
        .with_context(|| format!("gateway returned a non-JSON response ({status})"))?;

    if !status.is_success() {
        anyhow::bail!(
            "{}",
            envelope
                .error
                .unwrap_or_else(|| format!("request failed: {status}"))
        );
    }

    let text = envelope.text.unwrap_or_default();
    // The gateway's provider surfaces no grounding citations.
    let extraction = extract::extract(&text, Vec::new())?;

    render(&extraction.result, &extraction.sources);
    Ok(())
}

fn render(result: &AnalysisResult, sources: &[SourceReference]) {
    println!("主题: {}", result.topic);

    if !result.summary.is_empty() {
        println!("\n{}", result.summary);
    }

    if !result.keywords.is_empty() {
        println!("\n关键词 (按热度排序, 前 {TOP_KEYWORDS}):");
        for (rank, item) in ranked_keywords(&result.keywords)
            .into_iter()
            .take(TOP_KEYWORDS)
            .enumerate()
        {
            println!(
                "{:>2}. [{:>3}] {}  ({} / {})",
                rank + 1,
                item.heat_score,
                item.keyword,
                item.platform.label(),
                item.trend.label(),
            );
            if !item.reasoning.is_empty() {
                println!("        {}", item.reasoning);
            }
        }
    }

    if !result.generated_titles.is_empty() {
        println!("\n爆款标题:");
        for title in &result.generated_titles {
            println!("- {title}");
        }
    }

    if !sources.is_empty() {
        println!("\n来源:");
        for source in sources {
            println!("- {} <{}>", source.title, source.uri);
        }
    }
}

/// Keywords sorted by heat score, descending. Input order is preserved
/// among equal scores.
fn ranked_keywords(keywords: &[KeywordItem]) -> Vec<&KeywordItem> {
    let mut ranked: Vec<&KeywordItem> = keywords.iter().collect();
    ranked.sort_by(|a, b| b.heat_score.cmp(&a.heat_score));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use trend_common::analysis::{Platform, Trend};

    fn keyword(name: &str, heat: i64) -> KeywordItem {
        KeywordItem {
            keyword: name.into(),
            heat_score: heat,
            platform: Platform::Other,
            trend: Trend::Stable,
            reasoning: String::new(),
        }
    }

    #[test]
    fn test_ranking_is_descending_and_stable() {
        let keywords = vec![
            keyword("a", 40),
            keyword("b", 90),
            keyword("c", 40),
            keyword("d", 70),
        ];
        let ranked = ranked_keywords(&keywords);
        let names: Vec<&str> = ranked.iter().map(|k| k.keyword.as_str()).collect();
        assert_eq!(names, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_cli_parses_gateway_flag() {
        let cli = Cli::try_parse_from(["trend", "夏季食谱", "--gateway", "http://host:9000"])
            .unwrap();
        assert_eq!(cli.topic, "夏季食谱");
        assert_eq!(cli.gateway, "http://host:9000");
    }

    #[test]
    fn test_cli_default_gateway() {
        let cli = Cli::try_parse_from(["trend", "AI工具"]).unwrap();
        assert_eq!(cli.gateway, "http://127.0.0.1:8787");
    }

    #[test]
    fn test_gateway_error_envelope_deserializes() {
        let envelope: GatewayResponse =
            serde_json::from_str(r#"{"error":"Configuration error: secrets missing"}"#).unwrap();
        assert!(envelope.text.is_none());
        assert!(envelope.error.unwrap().contains("Configuration"));
    }
}
