use serde::{Deserialize, Serialize};

pub const MIN_PARAS: u8 = 1;
pub const MAX_PARAS: u8 = 10;

/// Meat profile understood by the upstream generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeatType {
    #[serde(rename = "all-meat")]
    AllMeat,
    #[serde(rename = "meat-and-filler")]
    MeatAndFiller,
}

impl MeatType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeatType::AllMeat => "all-meat",
            MeatType::MeatAndFiller => "meat-and-filler",
        }
    }
}

/// One generation request. Immutable once parsed; the three fields fully
/// determine the cache key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    #[serde(rename = "type", default = "default_meat_type")]
    pub meat_type: MeatType,
    #[serde(default = "default_paras")]
    pub paras: u8,
    #[serde(default = "default_start_with_lorem")]
    pub start_with_lorem: bool,
}

fn default_meat_type() -> MeatType {
    MeatType::AllMeat
}

fn default_paras() -> u8 {
    3
}

fn default_start_with_lorem() -> bool {
    true
}

impl GenerationRequest {
    /// Boundary validation. Runs before any cache or network work.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.paras < MIN_PARAS || self.paras > MAX_PARAS {
            return Err(ValidationError::ParasOutOfRange(self.paras));
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("paras must be between 1 and 10, got {0}")]
    ParasOutOfRange(u8),
}

/// Wire response for a successful generation. `html` is the rendered form
/// the editor stores as block content; edits to it never round-trip back
/// to `paragraphs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub paragraphs: Vec<String>,
    pub html: String,
    pub cached: bool,
}
