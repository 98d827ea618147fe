use chrono::Local;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::models::TripDetails;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    system_instruction: Content,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

/// Extract structured trip details from a free-text request via the
/// JSON-mode language model API.
pub async fn parse_trip(client: &Client, config: &Config, text: &str) -> Option<TripDetails> {
    match fetch_parse(client, config, text).await {
        Ok(details) => details,
        Err(err) => {
            tracing::warn!("trip parsing failed: {err}");
            None
        }
    }
}

async fn fetch_parse(
    client: &Client,
    config: &Config,
    text: &str,
) -> Result<Option<TripDetails>, reqwest::Error> {
    let now = Local::now().format("%Y-%m-%dT%H:%M:%S").to_string();
    let request = GenerateRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: text.to_string(),
            }],
        }],
        system_instruction: Content {
            parts: vec![Part {
                text: system_prompt(&now),
            }],
        },
        generation_config: GenerationConfig {
            response_mime_type: "application/json",
        },
    };

    let response: GenerateResponse = client
        .post(&config.parser_url)
        .query(&[("key", config.parser_api_key.as_str())])
        .json(&request)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let Some(text) = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content.parts.into_iter().next())
        .map(|part| part.text)
    else {
        return Ok(None);
    };

    Ok(decode_details(&text))
}

/// Decode the model's JSON answer, tolerating markdown code fences around
/// the payload.
fn decode_details(raw: &str) -> Option<TripDetails> {
    let cleaned = raw.replace("```json", "").replace("```", "");
    match serde_json::from_str(cleaned.trim()) {
        Ok(details) => Some(details),
        Err(err) => {
            tracing::warn!("trip parser returned invalid JSON: {err}");
            None
        }
    }
}

fn system_prompt(now: &str) -> String {
    format!(
        "You are a navigation assistant. Extract trip details from the user's input.\n\
         Current Date/Time: {now}\n\
         Output Format: JSON object ONLY.\n\
         Keys:\n\
         - \"origin\": The starting location (string). If not specified, return null.\n\
         - \"destination\": The destination (string). Required.\n\
         - \"departure_time\": The specific departure time in ISO 8601 format (YYYY-MM-DDTHH:MM:SS).\n\
           - If the user names a weekday, resolve it to the next upcoming one relative to {now}.\n\
           - If no time is specified, use the Current Date/Time exactly."
    )
}
