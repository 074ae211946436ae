use serde_json::Value;

use crate::store::Store;

/// Whether public form submissions must carry a Turnstile token.
pub fn enabled(store: &dyn Store) -> bool {
    store.setting_get_bool("security_turnstile_enabled")
}

/// Verify a Cloudflare Turnstile token against the siteverify endpoint.
/// Ok(false) means the service rejected the token; Err means the call
/// itself failed (misconfiguration, network, bad response).
pub fn verify(store: &dyn Store, token: &str, remote_ip: Option<&str>) -> Result<bool, String> {
    let secret_key = store.setting_get_or("security_turnstile_secret_key", "");
    if secret_key.is_empty() {
        return Err("Turnstile secret key not configured".into());
    }

    let mut form = vec![("secret", secret_key.as_str()), ("response", token)];
    if let Some(ip) = remote_ip {
        form.push(("remoteip", ip));
    }

    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()
        .map_err(|e| format!("HTTP client error: {}", e))?;

    let resp = client
        .post("https://challenges.cloudflare.com/turnstile/v0/siteverify")
        .form(&form)
        .send()
        .map_err(|e| format!("Turnstile request failed: {}", e))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let text = resp.text().unwrap_or_default();
        return Err(format!("Turnstile returned {}: {}", status, text));
    }

    let json: Value = resp
        .json()
        .map_err(|e| format!("Turnstile JSON parse error: {}", e))?;

    let success = json
        .get("success")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);

    if !success {
        let errors = json
            .get("error-codes")
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();
        log::warn!("Turnstile verification failed: {}", errors);
    }

    Ok(success)
}
