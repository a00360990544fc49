//! Schema-validated model flows.
//!
//! Each flow is one call to the generative model: validate the input record,
//! render the prompt, invoke the model, validate the structured output. The
//! three flows share one generic [`Flow`] shape configured with a prompt and
//! a pair of validators.

mod client;
mod prompts;

pub use client::{GeminiClient, InlineImage};

use serde::de::DeserializeOwned;
use shared::{
    DataUri, DataUriError, DiseaseRequest, DiseaseResponse, SpeciesRequest, SpeciesResponse,
    TreatmentRequest, TreatmentResponse,
};

#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("invalid request: {0}")]
    Validation(String),
    #[error("model call failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("model API returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("model returned no content")]
    EmptyResponse,
    #[error("model output failed schema validation: {0}")]
    InvalidOutput(String),
}

impl FlowError {
    /// Validation errors are the caller's fault; everything else is an
    /// inference failure at or past the model boundary.
    pub fn is_validation(&self) -> bool {
        matches!(self, FlowError::Validation(_))
    }
}

impl From<DataUriError> for FlowError {
    fn from(error: DataUriError) -> Self {
        FlowError::Validation(error.to_string())
    }
}

/// Rendered request for one model call: the user prompt plus, for the image
/// flows, the photo payload borrowed straight out of the input's data URI.
#[derive(Debug)]
pub struct FlowParts<'a> {
    pub prompt: String,
    pub image: Option<InlineImage<'a>>,
}

/// One schema-validated model call, parameterized over its input and output
/// records. `build` validates the input and renders the prompt; `check`
/// validates what the schema's types alone cannot express.
pub struct Flow<I, O> {
    name: &'static str,
    system: &'static str,
    build: for<'a> fn(&'a I) -> Result<FlowParts<'a>, FlowError>,
    check: fn(&O) -> Result<(), FlowError>,
}

impl<I, O: DeserializeOwned> Flow<I, O> {
    pub async fn run(&self, client: &GeminiClient, input: &I) -> Result<O, FlowError> {
        let parts = (self.build)(input)?;

        log::info!("[LLM] Flow: {} (model: {})", self.name, client.model());
        let text = client.generate(self.system, &parts.prompt, parts.image).await?;

        let output: O = serde_json::from_str(text.trim()).map_err(|e| {
            log::warn!("[LLM] {} output failed to parse: {}", self.name, e);
            log::warn!("[LLM] Raw output: {}", text);
            FlowError::InvalidOutput(e.to_string())
        })?;
        (self.check)(&output)?;
        Ok(output)
    }
}

pub fn identify_species() -> Flow<SpeciesRequest, SpeciesResponse> {
    Flow {
        name: "identify-species",
        system: prompts::IDENTIFY_SPECIES_SYSTEM,
        build: species_parts,
        check: species_check,
    }
}

pub fn detect_disease() -> Flow<DiseaseRequest, DiseaseResponse> {
    Flow {
        name: "detect-disease",
        system: prompts::DETECT_DISEASE_SYSTEM,
        build: disease_parts,
        check: accept_any,
    }
}

pub fn recommend_treatment() -> Flow<TreatmentRequest, TreatmentResponse> {
    Flow {
        name: "recommend-treatment",
        system: prompts::RECOMMEND_TREATMENT_SYSTEM,
        build: treatment_parts,
        check: accept_any,
    }
}

fn species_parts(request: &SpeciesRequest) -> Result<FlowParts<'_>, FlowError> {
    let photo = DataUri::parse_image(&request.photo_data_uri)?;
    Ok(FlowParts {
        prompt: prompts::IDENTIFY_SPECIES_PROMPT.to_string(),
        image: Some(InlineImage {
            mime_type: photo.mime_type,
            data: photo.payload,
        }),
    })
}

fn species_check(output: &SpeciesResponse) -> Result<(), FlowError> {
    if !(0.0..=1.0).contains(&output.confidence) {
        return Err(FlowError::InvalidOutput(format!(
            "confidence {} outside [0, 1]",
            output.confidence
        )));
    }
    Ok(())
}

fn disease_parts(request: &DiseaseRequest) -> Result<FlowParts<'_>, FlowError> {
    let photo = DataUri::parse_image(&request.photo_data_uri)?;
    Ok(FlowParts {
        prompt: prompts::DETECT_DISEASE_PROMPT.to_string(),
        image: Some(InlineImage {
            mime_type: photo.mime_type,
            data: photo.payload,
        }),
    })
}

fn treatment_parts(request: &TreatmentRequest) -> Result<FlowParts<'_>, FlowError> {
    if request.disease_name.trim().is_empty() {
        return Err(FlowError::Validation("diseaseName must not be empty".to_string()));
    }
    if request.plant_species.trim().is_empty() {
        return Err(FlowError::Validation("plantSpecies must not be empty".to_string()));
    }
    Ok(FlowParts {
        prompt: prompts::build_treatment_prompt(&request.disease_name, &request.plant_species),
        image: None,
    })
}

fn accept_any<O>(_output: &O) -> Result<(), FlowError> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHOTO: &str = "data:image/jpeg;base64,aGVsbG8=";

    #[test]
    fn species_parts_carry_the_photo_inline() {
        let request = SpeciesRequest {
            photo_data_uri: PHOTO.to_string(),
        };
        let parts = species_parts(&request).unwrap();
        let image = parts.image.unwrap();
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(image.data, "aGVsbG8=");
        assert!(parts.prompt.contains("confidence"));
    }

    #[test]
    fn species_parts_reject_a_non_data_uri() {
        let request = SpeciesRequest {
            photo_data_uri: "https://example.com/rose.jpg".to_string(),
        };
        let error = species_parts(&request).unwrap_err();
        assert!(error.is_validation());
    }

    #[test]
    fn disease_parts_reject_a_non_image_payload() {
        let request = DiseaseRequest {
            photo_data_uri: "data:application/pdf;base64,aGVsbG8=".to_string(),
        };
        let error = disease_parts(&request).unwrap_err();
        assert!(error.is_validation());
    }

    #[test]
    fn confidence_must_stay_in_the_unit_interval() {
        let mut output = SpeciesResponse {
            species: "Tomato".to_string(),
            confidence: 0.0,
            description: String::new(),
        };
        assert!(species_check(&output).is_ok());

        output.confidence = 1.0;
        assert!(species_check(&output).is_ok());

        output.confidence = 1.2;
        let error = species_check(&output).unwrap_err();
        assert!(matches!(error, FlowError::InvalidOutput(_)));
        assert!(!error.is_validation());
    }

    #[test]
    fn treatment_parts_require_both_fields() {
        let request = TreatmentRequest {
            disease_name: "  ".to_string(),
            plant_species: "Rose".to_string(),
        };
        assert!(treatment_parts(&request).unwrap_err().is_validation());

        let request = TreatmentRequest {
            disease_name: "Black Spot".to_string(),
            plant_species: String::new(),
        };
        assert!(treatment_parts(&request).unwrap_err().is_validation());

        let request = TreatmentRequest {
            disease_name: "Black Spot".to_string(),
            plant_species: "Rose".to_string(),
        };
        let parts = treatment_parts(&request).unwrap();
        assert!(parts.image.is_none());
        assert!(parts.prompt.contains("Black Spot"));
    }

    #[test]
    fn malformed_data_uri_maps_to_validation_error() {
        let error: FlowError = DataUriError::MissingScheme.into();
        assert!(error.is_validation());
    }
}
