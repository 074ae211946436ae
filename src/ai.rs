use serde_json::{json, Value};

use crate::store::Store;

#[derive(Debug)]
pub struct AiError(pub String);

impl std::fmt::Display for AiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generate a short blog-post summary through Cloudflare Workers AI.
/// The response is stripped of any leading "Summary:" label and clamped
/// to 200 characters.
pub fn generate_summary(
    store: &dyn Store,
    title: &str,
    manual_summary: Option<&str>,
) -> Result<String, AiError> {
    let account_id = store.setting_get_or("ai_cloudflare_account_id", "");
    let api_token = store.setting_get_or("ai_cloudflare_api_token", "");

    if account_id.is_empty() || api_token.is_empty() {
        return Err(AiError(
            "Cloudflare account ID or API token not configured".into(),
        ));
    }

    let model = store.setting_get_or("ai_cloudflare_model", "@cf/meta/llama-3-8b-instruct");

    let url = format!(
        "https://api.cloudflare.com/client/v4/accounts/{}/ai/run/{}",
        account_id, model
    );

    let prompt = build_prompt(title, manual_summary);
    let body = json!({
        "messages": [
            {"role": "user", "content": prompt}
        ],
        "max_tokens": 150,
        "temperature": 0.7
    });

    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(120))
        .build()
        .map_err(|e| AiError(format!("HTTP client error: {}", e)))?;

    let resp = client
        .post(&url)
        .header("Authorization", format!("Bearer {}", api_token))
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .map_err(|e| AiError(format!("Cloudflare AI request failed: {}", e)))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let text = resp.text().unwrap_or_default();
        return Err(AiError(format!(
            "Cloudflare AI returned {}: {}",
            status, text
        )));
    }

    let json: Value = resp
        .json()
        .map_err(|e| AiError(format!("Cloudflare AI JSON parse error: {}", e)))?;

    // Chat-style models answer under result.response; OpenAI-compatible
    // ones under result.choices[0].message.content
    let text = json
        .get("result")
        .and_then(|r| r.get("response"))
        .and_then(|r| r.as_str())
        .or_else(|| {
            json.get("result")
                .and_then(|r| r.get("choices"))
                .and_then(|c| c.get(0))
                .and_then(|c| c.get("message"))
                .and_then(|m| m.get("content"))
                .and_then(|c| c.as_str())
        })
        .map(|s| s.trim().to_string())
        .ok_or_else(|| AiError("Unexpected AI response format".into()))?;

    Ok(clean_summary(&text))
}

fn build_prompt(title: &str, manual_summary: Option<&str>) -> String {
    let mut prompt = format!(
        "Please write a concise, engaging summary for a blog post with the following details:\n\n\
         Title: {}\n",
        title
    );
    if let Some(manual) = manual_summary {
        if !manual.is_empty() {
            prompt.push_str(&format!("Manual Summary: {}\n", manual));
        }
    }
    prompt.push_str(
        "\nGenerate a professional summary that would be suitable for SEO meta descriptions \
         and social media sharing. Keep it between 120-160 characters and make it compelling \
         for readers. Focus on the key value and main points of the article.\n\nSummary:",
    );
    prompt
}

/// Strip a leading "Summary:" label and clamp to 200 characters.
pub fn clean_summary(raw: &str) -> String {
    let mut summary = raw.trim().to_string();
    if let Some(prefix) = summary.get(..8) {
        if prefix.eq_ignore_ascii_case("summary:") {
            summary = summary[8..].trim_start().to_string();
        }
    }
    if summary.chars().count() > 200 {
        summary = format!("{}...", summary.chars().take(197).collect::<String>());
    }
    summary
}
