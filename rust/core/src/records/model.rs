use crate::errors::ProjectError;
use crate::validation::{FieldSpec, Schema};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of model names accepted by the model lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelName {
    Alexnet,
    Resnet,
    Lenet,
}

impl ModelName {
    pub const ALL: [ModelName; 3] = [ModelName::Alexnet, ModelName::Resnet, ModelName::Lenet];

    pub fn tokens() -> [&'static str; 3] {
        Self::ALL.map(ModelName::as_str)
    }

    /// Exact, case-sensitive token match.
    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|model| model.as_str() == token)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ModelName::Alexnet => "alexnet",
            ModelName::Resnet => "resnet",
            ModelName::Lenet => "lenet",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ModelName::Alexnet => "Es alexnet",
            ModelName::Resnet => "Es resnet",
            ModelName::Lenet => "Es lenet",
        }
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Path schema for `/models/{model_name}`.
pub fn model_schema() -> Result<Schema, ProjectError> {
    Schema::builder()
        .field(FieldSpec::enumeration("model_name", &ModelName::tokens()).required().in_path())
        .build()
}
