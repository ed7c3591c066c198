//! Exact token counting with tiktoken BPE encoders.
//!
//! Encoders are lazy-loaded once per process. They are only used to measure
//! estimator accuracy, never on the estimation path.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tiktoken_rs::{cl100k_base, o200k_base, CoreBPE};

use crate::error::{Result, TokenestError};

type Loaded = std::result::Result<CoreBPE, String>;

static CL100K: OnceLock<Loaded> = OnceLock::new();
static O200K: OnceLock<Loaded> = OnceLock::new();

/// BPE encoding used as ground truth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceEncoding {
    /// GPT-3.5 / GPT-4
    #[default]
    Cl100kBase,
    /// GPT-4o, o1, o3
    O200kBase,
}

impl ReferenceEncoding {
    /// Infer the encoding from a model name; anything unrecognised is cl100k.
    ///
    /// # Example
    /// ```
    /// use tokenest::reference::ReferenceEncoding;
    ///
    /// assert_eq!(ReferenceEncoding::for_model("gpt-4o-mini"), ReferenceEncoding::O200kBase);
    /// assert_eq!(ReferenceEncoding::for_model("claude-3-opus"), ReferenceEncoding::Cl100kBase);
    /// ```
    pub fn for_model(model: &str) -> Self {
        let model = model.to_lowercase();
        if model.contains("gpt-4o")
            || model.contains("gpt-4.1")
            || model.contains("gpt-5")
            || model.starts_with("o1")
            || model.starts_with("o3")
            || model.starts_with("o4")
            || model.contains("/o1")
            || model.contains("/o3")
            || model.contains("/o4")
        {
            ReferenceEncoding::O200kBase
        } else {
            ReferenceEncoding::Cl100kBase
        }
    }

    /// tiktoken name
    pub fn name(&self) -> &'static str {
        match self {
            ReferenceEncoding::Cl100kBase => "cl100k_base",
            ReferenceEncoding::O200kBase => "o200k_base",
        }
    }

    fn bpe(self) -> Result<&'static CoreBPE> {
        let loaded = match self {
            ReferenceEncoding::Cl100kBase => {
                CL100K.get_or_init(|| cl100k_base().map_err(|e| e.to_string()))
            },
            ReferenceEncoding::O200kBase => {
                O200K.get_or_init(|| o200k_base().map_err(|e| e.to_string()))
            },
        };
        loaded
            .as_ref()
            .map_err(|e| TokenestError::Reference(format!("{}: {e}", self.name())))
    }
}

impl std::fmt::Display for ReferenceEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Exact BPE token counter
///
/// # Example
/// ```
/// use tokenest::reference::{ReferenceCounter, ReferenceEncoding};
///
/// let counter = ReferenceCounter::new(ReferenceEncoding::O200kBase);
/// let tokens = counter.count("Hello, world!").unwrap();
/// assert!(tokens > 0 && tokens < 10);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceCounter {
    encoding: ReferenceEncoding,
}

impl ReferenceCounter {
    /// Counter for `encoding`
    pub fn new(encoding: ReferenceEncoding) -> Self {
        Self { encoding }
    }

    /// Counter for the encoding `model` uses
    pub fn for_model(model: &str) -> Self {
        Self::new(ReferenceEncoding::for_model(model))
    }

    /// Encoding in use
    pub fn encoding(&self) -> ReferenceEncoding {
        self.encoding
    }

    /// Count tokens, special tokens included
    pub fn count(&self, text: &str) -> Result<usize> {
        Ok(self.encoding.bpe()?.encode_with_special_tokens(text).len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_basic() {
        let counter = ReferenceCounter::default();
        let tokens = counter.count("Hello, world!").unwrap();
        assert!(tokens > 0);
        assert!(tokens < 10);
        assert_eq!(counter.count("").unwrap(), 0);
    }

    #[test]
    fn test_encodings_agree_on_shape() {
        let text = "The quick brown fox jumps over the lazy dog.";
        let cl100k = ReferenceCounter::new(ReferenceEncoding::Cl100kBase)
            .count(text)
            .unwrap();
        let o200k = ReferenceCounter::new(ReferenceEncoding::O200kBase)
            .count(text)
            .unwrap();
        assert!(cl100k > 5 && cl100k < 15);
        assert!(o200k > 5 && o200k < 15);
    }

    #[test]
    fn test_count_is_deterministic() {
        let counter = ReferenceCounter::for_model("gpt-4");
        let text = r#"{"model":"gpt-4","messages":[{"role":"user","content":"Hello"}]}"#;
        assert_eq!(counter.count(text).unwrap(), counter.count(text).unwrap());
    }

    #[test]
    fn test_for_model() {
        assert_eq!(ReferenceEncoding::for_model("openai/gpt-4o"), ReferenceEncoding::O200kBase);
        assert_eq!(ReferenceEncoding::for_model("o3-mini"), ReferenceEncoding::O200kBase);
        assert_eq!(ReferenceEncoding::for_model("gpt-3.5-turbo"), ReferenceEncoding::Cl100kBase);
        assert_eq!(ReferenceEncoding::for_model(""), ReferenceEncoding::Cl100kBase);
        assert_eq!(ReferenceEncoding::O200kBase.to_string(), "o200k_base");
    }
}
