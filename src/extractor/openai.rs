//! OpenAI互換ビジョンAPIクライアント
//!
//! 画像をbase64のdata URLとしてchat completionsに渡す。
//! 1呼び出し1画像。逐次実行の制御はパイプライン側。

use crate::config::Config;
use crate::error::{MenuAiError, Result};
use crate::extractor::{parser, prompts, DrinkExtractor, ImageExtraction};
use crate::loader::MenuImage;
use crate::preference::Preference;
use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub struct OpenAiExtractor {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
    verbose: bool,
}

/// chat completionsリクエスト
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: MessageContent,
}

#[derive(Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

/// chat completionsレスポンス
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAiExtractor {
    pub fn new(config: &Config, verbose: bool) -> Result<Self> {
        let api_key = config.get_api_key()?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            api_key,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            verbose,
        })
    }

    fn build_request(
        &self,
        preference: &Preference,
        image: &MenuImage,
        index: usize,
        total: usize,
    ) -> ChatRequest {
        let data_url = format!(
            "data:{};base64,{}",
            image.mime_type,
            base64::engine::general_purpose::STANDARD.encode(&image.bytes)
        );

        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MessageContent::Text(prompts::SYSTEM_PROMPT.to_string()),
                },
                ChatMessage {
                    role: "user",
                    content: MessageContent::Parts(vec![
                        ContentPart::Text {
                            text: prompts::build_image_prompt(preference, index, total),
                        },
                        ContentPart::ImageUrl {
                            image_url: ImageUrl { url: data_url },
                        },
                    ]),
                },
            ],
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        }
    }
}

#[async_trait]
impl DrinkExtractor for OpenAiExtractor {
    async fn extract(
        &self,
        preference: &Preference,
        image: &MenuImage,
        index: usize,
        total: usize,
    ) -> Result<ImageExtraction> {
        let request = self.build_request(preference, image, index, total);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let preview: String = body.chars().take(200).collect();
            return Err(MenuAiError::ApiCall(format!(
                "status {}: {}",
                status, preview
            )));
        }

        let chat: ChatResponse = response.json().await?;
        let content = chat
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| MenuAiError::ApiParse("空のレスポンス".into()))?;

        if self.verbose {
            println!("  [画像 {}/{}] レスポンス長: {} chars", index, total, content.len());
        }

        parser::parse_extraction_response(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_part_text_serialize() {
        let part = ContentPart::Text {
            text: "hello".into(),
        };
        let json = serde_json::to_string(&part).unwrap();
        assert_eq!(json, r#"{"type":"text","text":"hello"}"#);
    }

    #[test]
    fn test_content_part_image_url_serialize() {
        let part = ContentPart::ImageUrl {
            image_url: ImageUrl {
                url: "data:image/jpeg;base64,abc".into(),
            },
        };
        let json = serde_json::to_string(&part).unwrap();
        assert!(json.contains("\"type\":\"image_url\""));
        assert!(json.contains("\"url\":\"data:image/jpeg;base64,abc\""));
    }

    #[test]
    fn test_chat_request_serialize() {
        let request = ChatRequest {
            model: "gpt-4o".into(),
            messages: vec![ChatMessage {
                role: "system",
                content: MessageContent::Text("prompt".into()),
            }],
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"model\":\"gpt-4o\""));
        assert!(json.contains("\"role\":\"system\""));
        assert!(json.contains("\"response_format\":{\"type\":\"json_object\"}"));
    }

    #[test]
    fn test_chat_response_deserialize() {
        let json = r#"{
            "choices": [{"message": {"content": "{\"drinks\": []}"}}]
        }"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.choices.len(), 1);
        assert!(response.choices[0]
            .message
            .content
            .as_deref()
            .unwrap()
            .contains("drinks"));
    }
}
