//! ZR categorical-regression tables.
//!
//! The coefficients are produced offline by the fitting tool and baked in
//! here. [`ZrConfigDocument`] mirrors the tool's JSON output so a freshly
//! fitted table can be checked and diffed against the baked one; the
//! estimator itself only ever reads [`ZR_CONFIG`].

use serde::{Deserialize, Serialize};

use crate::error::{Result, TokenestError};

/// Number of regression features
pub const ZR_FEATURES: usize = 8;

/// Input category selecting a coefficient vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZrCategory {
    /// Default for prose and short inputs
    General,
    /// Mostly uppercase text
    Capital,
    /// Space-free text with punctuation (minified JSON, base64)
    Dense,
    /// Space-free hex dumps and digests
    Hex,
    /// Space-free alphanumeric runs with almost no punctuation
    Alnum,
}

impl ZrCategory {
    /// All categories
    pub const ALL: [ZrCategory; 5] = [
        ZrCategory::General,
        ZrCategory::Capital,
        ZrCategory::Dense,
        ZrCategory::Hex,
        ZrCategory::Alnum,
    ];

    /// Lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            ZrCategory::General => "general",
            ZrCategory::Capital => "capital",
            ZrCategory::Dense => "dense",
            ZrCategory::Hex => "hex",
            ZrCategory::Alnum => "alnum",
        }
    }
}

impl std::fmt::Display for ZrCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Segmentation and category thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZrThresholds {
    /// Characters per token for plain Latin runs
    pub chars_per_token: f64,
    /// Runs up to this many code points count as one unit
    pub short_threshold: usize,
    /// Uppercase ratio above which input is [`ZrCategory::Capital`]
    pub capital_threshold: f64,
    /// Space ratio below which input is considered dense
    pub dense_threshold: f64,
    /// Hex ratio above which dense input is [`ZrCategory::Hex`]
    pub hex_threshold: f64,
    /// Punctuation ratio below which dense input is [`ZrCategory::Alnum`]
    pub alnum_punct_threshold: f64,
}

/// Thresholds plus coefficient vectors.
///
/// An empty coefficient slice means "use General's".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZrConfig {
    /// Thresholds
    pub thresholds: ZrThresholds,
    /// General coefficients (always present)
    pub general: &'static [f64],
    /// Capital coefficients
    pub capital: &'static [f64],
    /// Dense coefficients
    pub dense: &'static [f64],
    /// Hex coefficients
    pub hex: &'static [f64],
    /// Alnum coefficients
    pub alnum: &'static [f64],
}

impl ZrConfig {
    /// Coefficients for `category`, falling back to General's
    pub fn coefficients(&self, category: ZrCategory) -> &'static [f64] {
        let coeffs = match category {
            ZrCategory::General => self.general,
            ZrCategory::Capital => self.capital,
            ZrCategory::Dense => self.dense,
            ZrCategory::Hex => self.hex,
            ZrCategory::Alnum => self.alnum,
        };
        if coeffs.is_empty() {
            self.general
        } else {
            coeffs
        }
    }
}

const MIXED_COEFFS: [f64; ZR_FEATURES] = [
    0.9315, 0.6002, -1.1969, -0.6224, -0.4560, 1.7567, 3.1898, -4.6306,
];

const LINEAR_COEFFS: [f64; ZR_FEATURES] = [2.0163, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];

/// Baked ZR table
pub static ZR_CONFIG: ZrConfig = ZrConfig {
    thresholds: ZrThresholds {
        chars_per_token: 3.0,
        short_threshold: 6,
        capital_threshold: 0.30,
        dense_threshold: 0.01,
        hex_threshold: 0.90,
        alnum_punct_threshold: 0.03,
    },
    general: &MIXED_COEFFS,
    capital: &LINEAR_COEFFS,
    dense: &MIXED_COEFFS,
    hex: &MIXED_COEFFS,
    alnum: &LINEAR_COEFFS,
};

/// Coefficient vectors keyed by category name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZrCoefficients {
    /// General coefficients
    pub general: Vec<f64>,
    /// Capital coefficients
    #[serde(default)]
    pub capital: Vec<f64>,
    /// Dense coefficients
    #[serde(default)]
    pub dense: Vec<f64>,
    /// Hex coefficients
    #[serde(default)]
    pub hex: Vec<f64>,
    /// Alnum coefficients
    #[serde(default)]
    pub alnum: Vec<f64>,
}

/// JSON document produced by the offline fitting tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZrConfigDocument {
    /// Thresholds
    pub thresholds: ZrThresholds,
    /// Coefficient vectors
    pub coefficients: ZrCoefficients,
    /// Free-form fit metadata (loss, dataset, metrics, timestamps)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl ZrConfigDocument {
    /// Export a baked config
    pub fn from_config(config: &ZrConfig) -> Self {
        Self {
            thresholds: config.thresholds,
            coefficients: ZrCoefficients {
                general: config.general.to_vec(),
                capital: config.capital.to_vec(),
                dense: config.dense.to_vec(),
                hex: config.hex.to_vec(),
                alnum: config.alnum.to_vec(),
            },
            metadata: None,
        }
    }

    /// Parse and validate a document
    ///
    /// # Example
    /// ```
    /// use tokenest::profile::{ZrConfigDocument, ZR_CONFIG};
    ///
    /// let json = ZrConfigDocument::from_config(&ZR_CONFIG).to_json_pretty().unwrap();
    /// let doc = ZrConfigDocument::from_json(&json).unwrap();
    /// assert_eq!(doc.thresholds, ZR_CONFIG.thresholds);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: Self = serde_json::from_str(json)?;
        doc.validate()?;
        Ok(doc)
    }

    /// Serialize as indented JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the document is usable as a baked table
    pub fn validate(&self) -> Result<()> {
        let t = &self.thresholds;
        if !(t.chars_per_token.is_finite() && t.chars_per_token > 0.0) {
            return Err(TokenestError::ZrConfig(format!(
                "chars_per_token must be positive, got {}",
                t.chars_per_token
            )));
        }
        for (name, value) in [
            ("capital_threshold", t.capital_threshold),
            ("dense_threshold", t.dense_threshold),
            ("hex_threshold", t.hex_threshold),
            ("alnum_punct_threshold", t.alnum_punct_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(TokenestError::ZrConfig(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }

        let c = &self.coefficients;
        if c.general.is_empty() {
            return Err(TokenestError::ZrConfig(
                "general coefficients are required".to_string(),
            ));
        }
        for (category, coeffs) in [
            (ZrCategory::General, &c.general),
            (ZrCategory::Capital, &c.capital),
            (ZrCategory::Dense, &c.dense),
            (ZrCategory::Hex, &c.hex),
            (ZrCategory::Alnum, &c.alnum),
        ] {
            if coeffs.is_empty() {
                continue;
            }
            if coeffs.len() != ZR_FEATURES {
                return Err(TokenestError::ZrConfig(format!(
                    "{category}: expected {ZR_FEATURES} coefficients, got {}",
                    coeffs.len()
                )));
            }
            if let Some(bad) = coeffs.iter().find(|v| !v.is_finite()) {
                return Err(TokenestError::ZrConfig(format!(
                    "{category}: non-finite coefficient {bad}"
                )));
            }
        }

        Ok(())
    }

    /// Whether this document's thresholds and coefficients equal the baked table
    pub fn matches(&self, config: &ZrConfig) -> bool {
        let baked = Self::from_config(config);
        self.thresholds == baked.thresholds && self.coefficients == baked.coefficients
    }
}
