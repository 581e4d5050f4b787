//! Quiz settings, read from yaml.

use crate::error::{QuizError, Result};
use crate::generator::{LinearGenerator, MixedGenerator, PowersGenerator};
use crate::grading::{Grader, GradingStrategy, DEFAULT_TOLERANCE};
use crate::traits::CardGenerator;
use serde::{Deserialize, Serialize};

/// Number of cards in one practice set.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Which problems end up in a set.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeckKind {
    Linear,
    ProductOfPowers,
    #[default]
    Mixed,
}

impl DeckKind {
    pub fn make_generator(&self) -> Box<dyn CardGenerator> {
        match *self {
            DeckKind::Linear => Box::new(LinearGenerator),
            DeckKind::ProductOfPowers => Box::new(PowersGenerator),
            DeckKind::Mixed => Box::new(MixedGenerator),
        }
    }
}

impl std::str::FromStr for DeckKind {
    type Err = QuizError;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "linear" => Ok(DeckKind::Linear),
            "product_of_powers" | "powers" => Ok(DeckKind::ProductOfPowers),
            "mixed" => Ok(DeckKind::Mixed),
            _ => Err(QuizError::Config(format!("unknown deck kind {s:?}"))),
        }
    }
}

#[derive(Debug, PartialEq, Copy, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GradingConfig {
    pub linear: GradingStrategy,
    pub product_of_powers: GradingStrategy,
}

impl Default for GradingConfig {
    fn default() -> Self {
        let grader = Grader::default();
        GradingConfig {
            linear: grader.linear,
            product_of_powers: grader.product_of_powers,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct QuizConfig {
    pub deck: DeckKind,
    pub batch_size: usize,
    /// Fixed seed for reproducible sets, entropy is used when absent.
    pub seed: Option<u64>,
    pub tolerance: f64,
    pub grading: GradingConfig,
}

impl Default for QuizConfig {
    fn default() -> Self {
        QuizConfig {
            deck: DeckKind::default(),
            batch_size: DEFAULT_BATCH_SIZE,
            seed: None,
            tolerance: DEFAULT_TOLERANCE,
            grading: Default::default(),
        }
    }
}

impl QuizConfig {
    /// Load and validate a yaml config file.
    pub fn load(filename: &str) -> Result<Self> {
        let file = std::fs::File::open(filename)?;
        let config: QuizConfig = serde_yaml::from_reader(file)?;
        config.validate()?;
        log::info!("loaded config from {filename}: {config:?}");
        Ok(config)
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        let config: QuizConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(QuizError::Config("batch_size must be at least 1".to_owned()));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(QuizError::Config(format!(
                "tolerance must be a positive number, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }

    pub fn grader(&self) -> Grader {
        Grader {
            linear: self.grading.linear,
            product_of_powers: self.grading.product_of_powers,
            tolerance: self.tolerance,
        }
    }
}
