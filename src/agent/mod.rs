//! Query agent over the loaded data.
//!
//! The agent boundary is a narrow seam: a question plus a serialized
//! snapshot of the current table in, opaque narrative text out. Alternate
//! providers or a mock substitute in tests without touching calling code.
//! The hosted call is a single blocking round-trip with a client timeout
//! and no retry or backoff; a slow provider stalls only the interaction
//! that asked.
//!
//! # Example
//!
//! ```ignore
//! use lancamento::agent::{GeminiAgent, QueryAgent, describe_failure};
//!
//! let agent = GeminiAgent::from_env()?;
//! let answer = match agent.ask("Qual o valor total?", &snapshot).await {
//!     Ok(text) => text,
//!     Err(e) => describe_failure(&e),
//! };
//! ```

mod gemini;
mod prompt;

pub use gemini::GeminiAgent;
pub use prompt::{SYSTEM_PROMPT, build_prompt};

use thiserror::Error;

/// Errors from the hosted model boundary.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AgentError {
    /// Neither `GOOGLE_API_KEY` nor `GEMINI_API_KEY` is set. Fatal at
    /// startup, before any interaction is possible.
    #[error("GOOGLE_API_KEY/GEMINI_API_KEY not set in the environment")]
    MissingApiKey,

    /// Connection-level failure.
    #[error("network error calling the model API: {0}")]
    Network(String),

    /// The provider refused for quota reasons.
    #[error("model API quota exhausted")]
    QuotaExhausted,

    /// Any other non-success response.
    #[error("model API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Provider error message, or the raw body.
        message: String,
    },

    /// The response decoded but carried no answer text.
    #[error("model API returned no answer text")]
    EmptyResponse,

    /// The response body was not decodable.
    #[error("failed to decode model API response: {0}")]
    Parse(String),
}

/// The substitution seam for question answering.
pub trait QueryAgent {
    /// Ask one free-text question about a serialized table snapshot.
    /// The answer is opaque narrative text; no structured contract.
    fn ask(
        &self,
        question: &str,
        context: &str,
    ) -> impl Future<Output = Result<String, AgentError>> + Send;
}

/// Convert a failed call into the descriptive text shown to the user,
/// so the interactive session stays usable after a failed question.
pub fn describe_failure(error: &AgentError) -> String {
    match error {
        AgentError::QuotaExhausted => "Erro ao gerar a análise contábil. Detalhes: \
             Cota de API Excedida (ResourceExhausted). Verifique seu plano \
             e os limites de uso do provedor."
            .to_string(),
        AgentError::MissingApiKey => {
            "Chave de API não configurada. Defina GOOGLE_API_KEY ou GEMINI_API_KEY.".to_string()
        }
        other => format!("Erro ao gerar a análise contábil. Detalhes: {other}. Verifique a API Key."),
    }
}
