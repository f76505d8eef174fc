//! Prompt construction for the marketing-analysis call.

/// Build the analysis prompt for a topic.
///
/// The model is instructed to return bare JSON without markdown fences;
/// the extractor downstream tolerates fenced output anyway.
pub fn build_prompt(topic: &str) -> String {
    format!(
        r#"你是一位精通中国互联网市场的 SEO 与内容营销专家。
请分析主题："{topic}"。

你的任务：
1. 模拟在微信 (WeChat)、百度 (Baidu)、知乎 (Zhihu) 等主流平台上搜索与该主题相关的近期高流量、高热度及长尾关键词。
2. 识别具有高搜索意图但竞争相对较小的具体“长尾”关键词。
3. 估算“热度分数”（0-100）和趋势（up, down, stable）。
4. 生成 5-8 个极具点击欲望的爆款文章标题。

请严格以 JSON 对象格式返回结果。不要包含 markdown 格式 (如 ```json )。

JSON 结构要求：
{{
  "topic": "{topic}",
  "summary": "简要总结目前趋势 (中文)。",
  "keywords": [
    {{
      "keyword": "string",
      "heatScore": number,
      "platform": "WeChat" | "Baidu" | "Zhihu" | "Other",
      "trend": "up" | "down" | "stable",
      "reasoning": "中文解释"
    }}
  ],
  "generatedTitles": ["string"]
}}"#
    )
}
