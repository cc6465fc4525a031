//! Encoder settings.
//!
//! ```
//! use protocol7::config::{EncoderConfig, WidthPolicy};
//!
//! let config = EncoderConfig::from_json(r#"{ "stride": 6 }"#).unwrap();
//! assert_eq!(config.stride, 6);
//! assert_eq!(config.width_policy, WidthPolicy::Reject);
//! assert_eq!(config.default_key, 5);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::placement::{Placement, REFERENCE_STRIDE, SPREAD_STRIDE};
use crate::verify::VerificationKey;

/// What to do with a symbol that needs more than 7 bits.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidthPolicy {
    /// Return [`crate::Error::InvalidSymbolWidth`].
    #[default]
    Reject,
    /// Keep the low 7 bits and drop the rest.
    Truncate,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    pub stride: usize,
    pub width_policy: WidthPolicy,
    /// Key for messages built without an explicit key or key source.
    pub default_key: u32,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        EncoderConfig {
            stride: REFERENCE_STRIDE,
            width_policy: WidthPolicy::Reject,
            default_key: 5,
        }
    }
}

impl EncoderConfig {
    /// Stride 6 preset; bits cover every column.
    pub fn spread() -> Self {
        EncoderConfig {
            stride: SPREAD_STRIDE,
            ..EncoderConfig::default()
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Validated placement for the configured stride.
    pub fn placement(&self) -> Result<Placement> {
        Placement::with_stride(self.stride)
    }

    pub fn default_key(&self) -> VerificationKey {
        VerificationKey::new(self.default_key)
    }
}
