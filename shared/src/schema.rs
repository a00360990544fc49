use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesRequest {
    /// Photo of the plant as a data URI: `data:<mimetype>;base64,<encoded_data>`.
    pub photo_data_uri: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesResponse {
    pub species: String,
    /// Identification confidence in the closed interval [0, 1].
    pub confidence: f64,
    pub description: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseRequest {
    pub photo_data_uri: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseResponse {
    pub disease_detected: bool,
    /// May be empty when no disease is detected.
    #[serde(default)]
    pub disease_name: String,
    #[serde(default)]
    pub symptoms_description: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentRequest {
    pub disease_name: String,
    pub plant_species: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentResponse {
    pub treatment: String,
    pub dosage: String,
}

/// Joined result of one analysis session. Held in UI state only, never persisted.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOutcome {
    pub species: SpeciesResponse,
    pub disease: DiseaseResponse,
    /// Present only when the disease detection flagged a disease.
    pub treatment: Option<TreatmentResponse>,
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Display, EnumString,
)]
pub enum HealthStatus {
    Healthy,
    Diseased,
}

/// One past diagnosis shown in the history view. Sample data only.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: Uuid,
    pub plant_name: String,
    pub disease: String,
    pub status: HealthStatus,
    pub date: NaiveDate,
    pub image_url: String,
}

/// JSON error envelope for non-2xx API responses.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_form_is_camel_case() {
        let response = DiseaseResponse {
            disease_detected: true,
            disease_name: "Black Spot".to_string(),
            symptoms_description: "Dark lesions on leaves".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"diseaseDetected\":true"));
        assert!(json.contains("\"diseaseName\":\"Black Spot\""));
        assert!(json.contains("\"symptomsDescription\""));
    }

    #[test]
    fn disease_response_fields_default_when_healthy() {
        let response: DiseaseResponse =
            serde_json::from_str(r#"{"diseaseDetected": false}"#).unwrap();
        assert!(!response.disease_detected);
        assert!(response.disease_name.is_empty());
        assert!(response.symptoms_description.is_empty());
    }

    #[test]
    fn outcome_round_trips_without_treatment() {
        let outcome = AnalysisOutcome {
            species: SpeciesResponse {
                species: "Tomato".to_string(),
                confidence: 0.92,
                description: "A widely cultivated nightshade.".to_string(),
            },
            disease: DiseaseResponse {
                disease_detected: false,
                disease_name: String::new(),
                symptoms_description: String::new(),
            },
            treatment: None,
        };
        let json = serde_json::to_string(&outcome).unwrap();
        let back: AnalysisOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back, outcome);
    }

    #[test]
    fn health_status_displays_as_badge_text() {
        assert_eq!(HealthStatus::Healthy.to_string(), "Healthy");
        assert_eq!(HealthStatus::Diseased.to_string(), "Diseased");
    }
}
