//! Prompt templates for the three analysis flows.
//!
//! Each flow forces JSON output via `responseMimeType`, so every template
//! spells out the exact structure the response must take.

pub const IDENTIFY_SPECIES_SYSTEM: &str =
    "You are an expert botanist specializing in plant species identification.";

pub const IDENTIFY_SPECIES_PROMPT: &str = r#"You will use the provided photo to identify the plant species.

Analyze the image to determine the plant species. Provide a confidence level for your identification and a brief description of the plant.

Respond with ONLY this JSON structure. No other text.
{
  "species": "<the identified species of the plant>",
  "confidence": <float 0.0-1.0>,
  "description": "<a brief description of the plant species>"
}"#;

pub const DETECT_DISEASE_SYSTEM: &str = "You are an expert in plant pathology.";

pub const DETECT_DISEASE_PROMPT: &str = r#"Analyze the provided image of a plant and determine if it shows signs of any disease. If a disease is detected, provide its name and a detailed description of the probable symptoms.

Respond with ONLY this JSON structure. No other text.
{
  "diseaseDetected": <true|false>,
  "diseaseName": "<the name of the detected disease, or an empty string>",
  "symptomsDescription": "<a description of the probable symptoms, or an empty string>"
}"#;

pub const RECOMMEND_TREATMENT_SYSTEM: &str =
    "You are an expert agronomist specializing in plant disease treatment.";

/// User message for the treatment flow. Text-only: no image crosses this
/// boundary, just the disease name and the identified species.
pub fn build_treatment_prompt(disease_name: &str, plant_species: &str) -> String {
    format!(
        r#"A plant of the species "{plant_species}" has been diagnosed with "{disease_name}".

Recommend a treatment for this disease and the dosage at which it should be applied.

Respond with ONLY this JSON structure. No other text.
{{
  "treatment": "<the recommended treatment>",
  "dosage": "<the dosage or application schedule>"
}}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn treatment_prompt_interpolates_both_fields() {
        let prompt = build_treatment_prompt("Black Spot", "Rose");
        assert!(prompt.contains("\"Black Spot\""));
        assert!(prompt.contains("\"Rose\""));
        assert!(prompt.contains("\"treatment\""));
        assert!(prompt.contains("\"dosage\""));
    }
}
