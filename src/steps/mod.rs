//! Step definitions and the validated catalog the stepper walks through.
//!
//! A catalog is built once at startup, either from the built-in inheritance
//! workflow or from a step file, and is never mutated afterwards.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod loader;

pub use loader::{load_steps_file, StepsFile, StepsFileError};

/// Icon shown for a step when it is neither current nor completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepIcon {
    Upload,
    Gavel,
    Search,
    FileText,
    PenTool,
    CheckCircle,
}

impl StepIcon {
    /// Terminal glyph for this icon
    pub fn glyph(&self) -> &'static str {
        match self {
            StepIcon::Upload => "⇪",
            StepIcon::Gavel => "⚖",
            StepIcon::Search => "⌕",
            StepIcon::FileText => "▤",
            StepIcon::PenTool => "✎",
            StepIcon::CheckCircle => "✔",
        }
    }
}

/// One stage of the workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDefinition {
    /// Ordinal position, 0-indexed and contiguous
    pub id: usize,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<StepIcon>,
    /// Documents the user must provide at this stage
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_docs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Marks the terminal stage
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub final_step: bool,
}

impl StepDefinition {
    fn new(id: usize, title: &str, description: &str, icon: StepIcon) -> Self {
        Self {
            id,
            title: title.to_string(),
            description: description.to_string(),
            icon: Some(icon),
            required_docs: Vec::new(),
            estimated_time: None,
            location: None,
            final_step: false,
        }
    }

    /// Icon to render, falling back to a generic one when the definition has none
    pub fn icon(&self) -> StepIcon {
        self.icon.unwrap_or(if self.final_step {
            StepIcon::CheckCircle
        } else {
            StepIcon::FileText
        })
    }
}

/// Reasons a list of step definitions cannot form a catalog
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("step catalog is empty")]
    Empty,

    #[error("step at position {position} has id {id}; ids must be 0-indexed and contiguous")]
    IdMismatch { position: usize, id: usize },

    #[error("step {id} has an empty title")]
    EmptyTitle { id: usize },

    #[error("no step is marked as the final step")]
    MissingFinalStep,

    #[error("{count} steps are marked as final; exactly one is allowed")]
    MultipleFinalSteps { count: usize },

    #[error("final step {id} is not the last step (last id is {last})")]
    FinalStepNotLast { id: usize, last: usize },
}

/// Validated, immutable sequence of step definitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepCatalog {
    steps: Vec<StepDefinition>,
}

impl StepCatalog {
    /// Validate `steps` and wrap them in a catalog
    pub fn new(steps: Vec<StepDefinition>) -> Result<Self, CatalogError> {
        if steps.is_empty() {
            return Err(CatalogError::Empty);
        }

        for (position, step) in steps.iter().enumerate() {
            if step.id != position {
                return Err(CatalogError::IdMismatch {
                    position,
                    id: step.id,
                });
            }
            if step.title.trim().is_empty() {
                return Err(CatalogError::EmptyTitle { id: step.id });
            }
        }

        let finals: Vec<usize> = steps
            .iter()
            .filter(|s| s.final_step)
            .map(|s| s.id)
            .collect();
        let last = steps.len() - 1;
        match finals.as_slice() {
            [] => Err(CatalogError::MissingFinalStep),
            [id] if *id != last => Err(CatalogError::FinalStepNotLast { id: *id, last }),
            [_] => Ok(Self { steps }),
            _ => Err(CatalogError::MultipleFinalSteps {
                count: finals.len(),
            }),
        }
    }

    /// The six-stage inheritance workflow
    pub fn inheritance() -> Self {
        let mut upload = StepDefinition::new(
            0,
            "Subir Documentos",
            "Cargar documentación requerida",
            StepIcon::Upload,
        );
        upload.required_docs = vec![
            "Certificado de defunción".to_string(),
            "Testamento".to_string(),
            "DNI herederos".to_string(),
        ];

        let mut legal = StepDefinition::new(
            1,
            "Revisión Legal",
            "Verificación por equipo jurídico",
            StepIcon::Gavel,
        );
        legal.estimated_time = Some("3-5 días hábiles".to_string());

        let mut valuation = StepDefinition::new(
            2,
            "Valoración",
            "Tasación de bienes y activos",
            StepIcon::Search,
        );
        valuation.estimated_time = Some("1-2 semanas".to_string());

        let mut paperwork = StepDefinition::new(
            3,
            "Documentación",
            "Preparación de documentos finales",
            StepIcon::FileText,
        );
        paperwork.estimated_time = Some("2-3 días hábiles".to_string());

        let mut signing = StepDefinition::new(
            4,
            "Firma",
            "Firma de documentos oficiales",
            StepIcon::PenTool,
        );
        signing.location = Some("Notaría o digital".to_string());

        let mut finish = StepDefinition::new(
            5,
            "Finalización",
            "Proceso completado",
            StepIcon::CheckCircle,
        );
        finish.final_step = true;

        Self {
            steps: vec![upload, legal, valuation, paperwork, signing, finish],
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false for a validated catalog; provided for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&StepDefinition> {
        self.steps.get(index)
    }

    /// Index of the last (final) step
    pub fn last_index(&self) -> usize {
        self.steps.len() - 1
    }

    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    pub fn iter(&self) -> impl Iterator<Item = &StepDefinition> {
        self.steps.iter()
    }
}

impl Default for StepCatalog {
    fn default() -> Self {
        Self::inheritance()
    }
}
