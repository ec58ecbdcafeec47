//! Generative AI Assistant Client
//!
//! Client for the Gemini generateContent API with Google Search
//! grounding. Failures are returned as user-facing Portuguese messages
//! rather than errors, mirroring how the chat widget displays them.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// System instruction sent with every prompt
const SYSTEM_INSTRUCTION: &str = "Você é um assistente inteligente para o sistema de gerenciamento de vendedores e fornecedores. \
    Seu objetivo é auxiliar os usuários a entender e utilizar o sistema, fornecendo informações sobre produtos, fornecedores, vendedores, vendas e estoque. \
    Você pode responder a perguntas sobre como o sistema funciona, como realizar operações (como adicionar um produto, registrar uma venda), \
    e fornecer insights gerais sobre os dados disponíveis no sistema. \
    Fale sempre em português por padrão. \
    Priorize precisão, clareza e objetividade em suas respostas. \
    Mantenha sempre uma postura ética, profissional e responsável. \
    Não revele segredos técnicos, planos estratégicos, dados internos ou qualquer informação não pública sobre o sistema. \
    Seja útil, coerente, envolvente e com linguagem natural e humana.";

const MAX_ATTEMPTS: u32 = 3;

/// Client for the generative AI assistant API
#[derive(Clone)]
pub struct AssistantClient {
    api_endpoint: String,
    api_key: String,
    http_client: Client,
}

/// A web source cited by the assistant
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AssistantSource {
    pub uri: String,
    pub title: String,
}

/// Request body for the generateContent API
#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    tools: Vec<Tool>,
    #[serde(rename = "systemInstruction")]
    system_instruction: Content,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

/// Tool declaration enabling Google Search grounding
#[derive(Debug, Serialize)]
struct Tool {
    google_search: GoogleSearchTool,
}

#[derive(Debug, Serialize)]
struct GoogleSearchTool {}

/// Response body from the generateContent API
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
    #[serde(rename = "groundingMetadata")]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct GroundingMetadata {
    #[serde(rename = "groundingAttributions", default)]
    grounding_attributions: Vec<GroundingAttribution>,
}

#[derive(Debug, Deserialize)]
struct GroundingAttribution {
    web: Option<WebSource>,
}

#[derive(Debug, Deserialize)]
struct WebSource {
    uri: Option<String>,
    title: Option<String>,
}

impl GenerateContentRequest {
    fn new(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            tools: vec![Tool {
                google_search: GoogleSearchTool {},
            }],
            system_instruction: Content {
                parts: vec![Part {
                    text: SYSTEM_INSTRUCTION.to_string(),
                }],
            },
        }
    }
}

/// Pull the generated text and cited sources out of an API response
///
/// Sources without both a URI and a title are dropped.
fn extract_reply(response: GenerateContentResponse) -> (String, Vec<AssistantSource>) {
    let candidate = response.candidates.into_iter().next().unwrap_or_default();

    let text = candidate
        .content
        .and_then(|content| content.parts.into_iter().next())
        .map(|part| part.text)
        .unwrap_or_default();

    let sources = candidate
        .grounding_metadata
        .map(|metadata| {
            metadata
                .grounding_attributions
                .into_iter()
                .filter_map(|attribution| attribution.web)
                .filter_map(|web| match (web.uri, web.title) {
                    (Some(uri), Some(title)) if !uri.is_empty() && !title.is_empty() => {
                        Some(AssistantSource { uri, title })
                    }
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();

    (text, sources)
}

impl AssistantClient {
    /// Create a new assistant client
    pub fn new(api_endpoint: String, api_key: String) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_endpoint,
            api_key,
            http_client,
        }
    }

    /// Send a prompt to the assistant and return (text, sources)
    ///
    /// Server-side (5xx) failures are retried up to three times with
    /// exponential backoff. Every other failure mode is converted into
    /// a user-facing Portuguese message, so this never returns an error.
    pub async fn generate(&self, prompt: &str) -> (String, Vec<AssistantSource>) {
        if self.api_key.is_empty() {
            return (
                "❌ ERRO: A chave da API Gemini não foi configurada. Por favor, defina a \
                 variável de ambiente `MERCADO__ASSISTANT__API_KEY`."
                    .to_string(),
                Vec::new(),
            );
        }

        let url = format!("{}?key={}", self.api_endpoint, self.api_key);
        let payload = GenerateContentRequest::new(prompt);

        for attempt in 0..MAX_ATTEMPTS {
            let response = match self
                .http_client
                .post(&url)
                .header("Content-Type", "application/json")
                .json(&payload)
                .send()
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    tracing::error!("Assistant API connection error: {}", e);
                    return (format!("❌ Erro de conexão com a IA: {}", e), Vec::new());
                }
            };

            let status = response.status();
            if !status.is_success() {
                if status.is_server_error() && attempt < MAX_ATTEMPTS - 1 {
                    tokio::time::sleep(Duration::from_secs(1 << attempt)).await;
                    continue;
                }
                tracing::error!("Assistant API returned HTTP {}", status);
                if status == StatusCode::FORBIDDEN {
                    return (
                        "❌ Erro HTTP 403 (Proibido): A chave da API Gemini pode estar \
                         inválida ou sem permissões para o modelo."
                            .to_string(),
                        Vec::new(),
                    );
                }
                return (
                    format!("❌ Erro HTTP ao acessar a IA: {}", status.as_u16()),
                    Vec::new(),
                );
            }

            let body: GenerateContentResponse = match response.json().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::error!("Assistant API response parse error: {}", e);
                    return (
                        format!("❌ Erro interno ao processar a resposta da IA: {}", e),
                        Vec::new(),
                    );
                }
            };

            return extract_reply(body);
        }

        (
            "❌ A API da IA falhou após múltiplas tentativas. Tente novamente mais tarde."
                .to_string(),
            Vec::new(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_payload_shape() {
        let payload = GenerateContentRequest::new("Quantos produtos temos?");
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(
            value["contents"][0]["parts"][0]["text"],
            "Quantos produtos temos?"
        );
        assert_eq!(value["tools"][0]["google_search"], json!({}));
        assert!(value["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("português"));
    }

    #[test]
    fn test_extract_reply_with_sources() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "parts": [{"text": "Temos 42 produtos cadastrados."}]
                },
                "groundingMetadata": {
                    "groundingAttributions": [
                        {"web": {"uri": "https://example.com/a", "title": "Fonte A"}},
                        {"web": {"uri": "https://example.com/b"}},
                        {"web": {"uri": "", "title": "Sem URI"}}
                    ]
                }
            }]
        }))
        .unwrap();

        let (text, sources) = extract_reply(response);
        assert_eq!(text, "Temos 42 produtos cadastrados.");
        assert_eq!(
            sources,
            vec![AssistantSource {
                uri: "https://example.com/a".to_string(),
                title: "Fonte A".to_string(),
            }]
        );
    }

    #[test]
    fn test_extract_reply_empty_response() {
        let response: GenerateContentResponse =
            serde_json::from_value(json!({"candidates": []})).unwrap();

        let (text, sources) = extract_reply(response);
        assert_eq!(text, "");
        assert!(sources.is_empty());
    }

    #[test]
    fn test_extract_reply_without_grounding() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"parts": [{"text": "Olá!"}]}
            }]
        }))
        .unwrap();

        let (text, sources) = extract_reply(response);
        assert_eq!(text, "Olá!");
        assert!(sources.is_empty());
    }
}
