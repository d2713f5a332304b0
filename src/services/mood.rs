/// Mood classification via the Gemini generateContent API
///
/// The classifier asks the model for at most three TMDB genre names as a bare
/// JSON object. Every upstream failure mode (missing key, transport error,
/// empty candidate list, unparseable completion, missing "genres" field)
/// collapses to the same fixed default pair, so callers always get at least
/// one genre back. Unknown genre names are not filtered here; the vocabulary
/// drops them during id translation.
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};

/// Returned whenever the upstream classifier cannot produce genres
const DEFAULT_GENRES: [&str; 2] = ["Drama", "Comedy"];

/// Bound on each Gemini call; the fallback path applies on expiry
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Maps free-text mood to an ordered list of genre names
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MoodClassifier: Send + Sync {
    /// Classifies mood text into 1..=3 genre names
    ///
    /// Errors only on empty input; upstream failures degrade to the default
    /// genre pair instead of surfacing.
    async fn classify(&self, mood: &str) -> AppResult<Vec<String>>;
}

#[derive(Clone)]
pub struct GeminiClassifier {
    http_client: HttpClient,
    api_key: Option<String>,
    api_url: String,
    model: String,
}

impl GeminiClassifier {
    pub fn new(api_key: Option<String>, api_url: String, model: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            model,
        }
    }

    fn build_prompt(mood: &str) -> String {
        format!(
            r#"You are an assistant that maps user moods to movie genres from TMDB.

User mood: "{mood}"

Respond ONLY with a JSON object of this exact shape:

{{
  "genres": ["Genre1", "Genre2", "Genre3"]
}}

Use only valid TMDB genre names, max 3, choose the most relevant."#
        )
    }
}

fn default_genres() -> Vec<String> {
    DEFAULT_GENRES.iter().map(|g| g.to_string()).collect()
}

// ============================================================================
// Gemini generateContent Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenresPayload {
    genres: Vec<Value>,
}

/// Parses the completion text as the `{"genres": [..]}` shape
///
/// Returns None when the text is not JSON or the array is absent or empty.
/// Elements are coerced to trimmed strings; non-string scalars keep their
/// JSON rendering, matching a lenient read of model output.
fn parse_genres(text: &str) -> Option<Vec<String>> {
    let payload: GenresPayload = serde_json::from_str(text.trim()).ok()?;
    if payload.genres.is_empty() {
        return None;
    }

    let genres = payload
        .genres
        .into_iter()
        .map(|value| match value {
            Value::String(s) => s.trim().to_string(),
            other => other.to_string().trim().to_string(),
        })
        .collect();

    Some(genres)
}

/// Extracts genres from a decoded generateContent payload
///
/// A response with zero candidates, a candidate without parts, or a part
/// whose text is not the expected shape all yield the default pair.
fn genres_from_response(payload: &GenerateContentResponse) -> Vec<String> {
    let Some(text) = payload
        .candidates
        .first()
        .and_then(|candidate| candidate.content.parts.first())
        .and_then(|part| part.text.as_deref())
    else {
        tracing::warn!("No candidates from Gemini, using fallback genres");
        return default_genres();
    };

    match parse_genres(text) {
        Some(genres) => {
            tracing::info!(genres = ?genres, "Mood classified");
            genres
        }
        None => {
            tracing::warn!(text = %text, "Gemini completion had no usable genres, using fallback");
            default_genres()
        }
    }
}

#[async_trait::async_trait]
impl MoodClassifier for GeminiClassifier {
    async fn classify(&self, mood: &str) -> AppResult<Vec<String>> {
        let mood = mood.trim();
        if mood.is_empty() {
            return Err(AppError::InvalidInput("Mood is required".to_string()));
        }

        // Without a key there is nothing to call; fall back immediately.
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::warn!("GEMINI_API_KEY not set, returning default genres");
            return Ok(default_genres());
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_url, self.model
        );

        let body = json!({
            "contents": [
                {
                    "parts": [{ "text": Self::build_prompt(mood) }]
                }
            ]
        });

        // Single attempt, no retry. Any failure from here on degrades.
        let response = match self
            .http_client
            .post(&url)
            .query(&[("key", api_key)])
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Gemini call failed, using fallback genres");
                return Ok(default_genres());
            }
        };

        if !response.status().is_success() {
            tracing::warn!(
                status = %response.status(),
                "Gemini returned non-success status, using fallback genres"
            );
            return Ok(default_genres());
        }

        let payload: GenerateContentResponse = match response.json().await {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(error = %e, "Could not decode Gemini response, using fallback genres");
                return Ok(default_genres());
            }
        };

        Ok(genres_from_response(&payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_genres_valid() {
        let text = r#"{"genres": ["Horror", "Thriller"]}"#;
        assert_eq!(
            parse_genres(text),
            Some(vec!["Horror".to_string(), "Thriller".to_string()])
        );
    }

    #[test]
    fn test_parse_genres_trims_elements() {
        let text = r#"{"genres": ["  Drama ", "Comedy"]}"#;
        assert_eq!(
            parse_genres(text),
            Some(vec!["Drama".to_string(), "Comedy".to_string()])
        );
    }

    #[test]
    fn test_parse_genres_not_json() {
        assert_eq!(parse_genres("Sure! Here are some genres: Drama"), None);
    }

    #[test]
    fn test_parse_genres_missing_field() {
        assert_eq!(parse_genres(r#"{"labels": ["Drama"]}"#), None);
    }

    #[test]
    fn test_parse_genres_empty_array() {
        assert_eq!(parse_genres(r#"{"genres": []}"#), None);
    }

    #[test]
    fn test_parse_genres_surrounding_whitespace() {
        let text = "\n  {\"genres\": [\"War\"]}  \n";
        assert_eq!(parse_genres(text), Some(vec!["War".to_string()]));
    }

    #[tokio::test]
    async fn test_classify_without_key_returns_defaults() {
        let classifier = GeminiClassifier::new(
            None,
            "http://127.0.0.1:9".to_string(),
            "gemini-1.5-flash".to_string(),
        );

        let genres = classifier.classify("I want something scary").await.unwrap();
        assert_eq!(genres, vec!["Drama".to_string(), "Comedy".to_string()]);
    }

    #[tokio::test]
    async fn test_classify_empty_mood_is_invalid_input() {
        let classifier = GeminiClassifier::new(
            None,
            "http://127.0.0.1:9".to_string(),
            "gemini-1.5-flash".to_string(),
        );

        let result = classifier.classify("   ").await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_classify_transport_failure_returns_defaults() {
        // Port 9 is unassigned locally; the connection is refused immediately.
        let classifier = GeminiClassifier::new(
            Some("test_key".to_string()),
            "http://127.0.0.1:9".to_string(),
            "gemini-1.5-flash".to_string(),
        );

        let genres = classifier.classify("anything").await.unwrap();
        assert_eq!(genres, vec!["Drama".to_string(), "Comedy".to_string()]);
    }

    /// Serves one canned HTTP response on a loopback port, then exits
    async fn spawn_one_shot_server(response: String) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                // Drain the request up to the end of the headers; the JSON
                // body rides along in the same segments on loopback.
                let mut buf = [0u8; 8192];
                let mut request = Vec::new();
                loop {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => {
                            request.extend_from_slice(&buf[..n]);
                            if request.windows(4).any(|w| w == b"\r\n\r\n") {
                                break;
                            }
                        }
                    }
                }
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        format!("http://{}", addr)
    }

    fn http_response(status_line: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        )
    }

    #[test]
    fn test_genres_from_response_zero_candidates() {
        let payload: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert_eq!(
            genres_from_response(&payload),
            vec!["Drama".to_string(), "Comedy".to_string()]
        );
    }

    #[test]
    fn test_genres_from_response_candidate_without_parts() {
        let payload: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": [{"content": {"parts": []}}]}"#).unwrap();
        assert_eq!(
            genres_from_response(&payload),
            vec!["Drama".to_string(), "Comedy".to_string()]
        );
    }

    #[test]
    fn test_genres_from_response_valid_candidate() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "{\"genres\": [\"Horror\", \"Thriller\"]}"}]}}
            ]
        }"#;
        let payload: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            genres_from_response(&payload),
            vec!["Horror".to_string(), "Thriller".to_string()]
        );
    }

    #[tokio::test]
    async fn test_classify_non_success_status_returns_defaults() {
        let api_url =
            spawn_one_shot_server(http_response("500 Internal Server Error", "{}")).await;
        let classifier = GeminiClassifier::new(
            Some("test_key".to_string()),
            api_url,
            "gemini-1.5-flash".to_string(),
        );

        let genres = classifier.classify("anything").await.unwrap();
        assert_eq!(genres, vec!["Drama".to_string(), "Comedy".to_string()]);
    }

    #[tokio::test]
    async fn test_classify_success_parses_completion() {
        let body = serde_json::json!({
            "candidates": [
                {"content": {"parts": [{"text": "{\"genres\": [\"Horror\", \"Thriller\"]}"}]}}
            ]
        })
        .to_string();
        let api_url = spawn_one_shot_server(http_response("200 OK", &body)).await;
        let classifier = GeminiClassifier::new(
            Some("test_key".to_string()),
            api_url,
            "gemini-1.5-flash".to_string(),
        );

        let genres = classifier.classify("I want something scary").await.unwrap();
        assert_eq!(genres, vec!["Horror".to_string(), "Thriller".to_string()]);
    }

    #[test]
    fn test_prompt_embeds_mood() {
        let prompt = GeminiClassifier::build_prompt("cozy rainy evening");
        assert!(prompt.contains("User mood: \"cozy rainy evening\""));
        assert!(prompt.contains("\"genres\""));
    }
}
