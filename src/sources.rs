use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Placeholder substituted with the percent-encoded prompt in a URL template.
pub const PROMPT_PLACEHOLDER: &str = "{prompt}";

/// One configured upstream text-generation endpoint.
///
/// Sources are immutable once loaded; their order in the configuration file is
/// the order the pipeline uses everywhere, including fusion tie-breaks.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Source {
    /// Short identifier used to label answers (e.g. "gemini")
    pub name: String,
    /// Endpoint URL containing the `{prompt}` placeholder
    pub url_template: String,
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("source '{0}' has no {{prompt}} placeholder in its URL template")]
    MissingPlaceholder(String),
}

impl Source {
    pub fn new(name: impl Into<String>, url_template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url_template: url_template.into(),
        }
    }

    /// Check that the URL template can actually carry a prompt.
    pub fn validate(&self) -> Result<(), SourceError> {
        if self.url_template.contains(PROMPT_PLACEHOLDER) {
            Ok(())
        } else {
            Err(SourceError::MissingPlaceholder(self.name.clone()))
        }
    }

    /// Render the request URL for a prompt, percent-encoding it into the template.
    pub fn render_url(&self, prompt: &str) -> Result<String, SourceError> {
        self.validate()?;
        Ok(self
            .url_template
            .replace(PROMPT_PLACEHOLDER, &encode_prompt(prompt)))
    }
}

/// Percent-encode a prompt for use in a query string.
pub fn encode_prompt(prompt: &str) -> String {
    url::form_urlencoded::byte_serialize(prompt.as_bytes()).collect()
}

/// The built-in source set, used when no configuration file exists yet.
pub fn default_sources() -> Vec<Source> {
    vec![
        Source::new(
            "gemini",
            "https://aryanapi.up.railway.app/api/gemini?prompt={prompt}",
        ),
        Source::new(
            "gemini-proxy",
            "https://aryanapi.up.railway.app/api/gemini-proxy2?prompt={prompt}",
        ),
        Source::new(
            "deepseek",
            "https://aryanapi.up.railway.app/api/deepseek3?prompt={prompt}",
        ),
        Source::new(
            "brave",
            "https://aryanapi.up.railway.app/api/brave?prompt={prompt}",
        ),
        Source::new(
            "llama",
            "https://aryanapi.up.railway.app/api/llama-4-maverick-17b-128e-instruct?uid=123&prompt={prompt}",
        ),
        Source::new(
            "gpt3",
            "https://aryanapi.up.railway.app/api/gpt-3.5-turbo?uid=123&prompt={prompt}",
        ),
        Source::new(
            "powerbrain",
            "https://aryanapi.up.railway.app/api/powerbrain?uid=1&prompt={prompt}",
        ),
    ]
}
