//! Analysis orchestration: one species/disease fan-out joined before an
//! optional treatment call. Platform-neutral so the browser client and tests
//! drive the same sequencing.

use thiserror::Error;

use crate::schema::{
    AnalysisOutcome, DiseaseRequest, DiseaseResponse, SpeciesRequest, SpeciesResponse,
    TreatmentRequest, TreatmentResponse,
};

/// Terminal failure of one analysis attempt. Never retried; a fresh user
/// action starts over.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct AnalysisError(pub String);

/// The three flow invocations, implemented over HTTP in the client and by
/// stubs in tests. Implementations may be swapped freely as long as the
/// schemas are honored.
#[allow(async_fn_in_trait)]
pub trait AnalysisApi {
    async fn identify_species(
        &self,
        request: SpeciesRequest,
    ) -> Result<SpeciesResponse, AnalysisError>;

    async fn detect_disease(
        &self,
        request: DiseaseRequest,
    ) -> Result<DiseaseResponse, AnalysisError>;

    async fn recommend_treatment(
        &self,
        request: TreatmentRequest,
    ) -> Result<TreatmentResponse, AnalysisError>;
}

/// Run one full analysis of `photo_data_uri`.
///
/// Species identification and disease detection run concurrently and are
/// joined; a failure in either fails the whole attempt with no partial
/// result. Treatment is requested only when a disease was detected, fed by
/// the detection's disease name and the sibling identification's species.
pub async fn run_analysis<A: AnalysisApi>(
    api: &A,
    photo_data_uri: &str,
) -> Result<AnalysisOutcome, AnalysisError> {
    let species_request = SpeciesRequest {
        photo_data_uri: photo_data_uri.to_string(),
    };
    let disease_request = DiseaseRequest {
        photo_data_uri: photo_data_uri.to_string(),
    };

    let (species, disease) = futures::try_join!(
        api.identify_species(species_request),
        api.detect_disease(disease_request),
    )?;

    let treatment = if disease.disease_detected {
        let request = TreatmentRequest {
            disease_name: disease.disease_name.clone(),
            plant_species: species.species.clone(),
        };
        Some(api.recommend_treatment(request).await?)
    } else {
        None
    };

    Ok(AnalysisOutcome {
        species,
        disease,
        treatment,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::RefCell;

    const PHOTO: &str = "data:image/jpeg;base64,aGVsbG8=";

    #[derive(Clone, Copy, PartialEq)]
    enum Fail {
        Nothing,
        Identify,
        Detect,
        Treatment,
    }

    struct StubApi {
        disease: DiseaseResponse,
        fail: Fail,
        calls: RefCell<Vec<String>>,
    }

    impl StubApi {
        fn healthy() -> Self {
            Self {
                disease: DiseaseResponse {
                    disease_detected: false,
                    disease_name: String::new(),
                    symptoms_description: String::new(),
                },
                fail: Fail::Nothing,
                calls: RefCell::new(Vec::new()),
            }
        }

        fn diseased() -> Self {
            Self {
                disease: DiseaseResponse {
                    disease_detected: true,
                    disease_name: "Black Spot".to_string(),
                    symptoms_description: "Circular dark lesions".to_string(),
                },
                fail: Fail::Nothing,
                calls: RefCell::new(Vec::new()),
            }
        }

        fn failing(fail: Fail) -> Self {
            let mut api = Self::diseased();
            api.fail = fail;
            api
        }
    }

    impl AnalysisApi for StubApi {
        async fn identify_species(
            &self,
            request: SpeciesRequest,
        ) -> Result<SpeciesResponse, AnalysisError> {
            self.calls
                .borrow_mut()
                .push(format!("identify:{}", request.photo_data_uri));
            if self.fail == Fail::Identify {
                return Err(AnalysisError("identify failed".to_string()));
            }
            Ok(SpeciesResponse {
                species: "Rose".to_string(),
                confidence: 0.87,
                description: "A woody perennial of the genus Rosa.".to_string(),
            })
        }

        async fn detect_disease(
            &self,
            request: DiseaseRequest,
        ) -> Result<DiseaseResponse, AnalysisError> {
            self.calls
                .borrow_mut()
                .push(format!("detect:{}", request.photo_data_uri));
            if self.fail == Fail::Detect {
                return Err(AnalysisError("detect failed".to_string()));
            }
            Ok(self.disease.clone())
        }

        async fn recommend_treatment(
            &self,
            request: TreatmentRequest,
        ) -> Result<TreatmentResponse, AnalysisError> {
            self.calls.borrow_mut().push(format!(
                "treat:{}:{}",
                request.disease_name, request.plant_species
            ));
            if self.fail == Fail::Treatment {
                return Err(AnalysisError("treatment failed".to_string()));
            }
            Ok(TreatmentResponse {
                treatment: "Copper-based fungicide".to_string(),
                dosage: "Spray every 10 days".to_string(),
            })
        }
    }

    #[test]
    fn healthy_plant_skips_treatment() {
        let api = StubApi::healthy();
        let outcome = block_on(run_analysis(&api, PHOTO)).unwrap();

        assert!(!outcome.disease.disease_detected);
        assert!(outcome.treatment.is_none());
        let calls = api.calls.borrow();
        assert!(!calls.iter().any(|c| c.starts_with("treat:")));
    }

    #[test]
    fn detected_disease_triggers_treatment_with_joined_fields() {
        let api = StubApi::diseased();
        let outcome = block_on(run_analysis(&api, PHOTO)).unwrap();

        assert_eq!(outcome.disease.disease_name, "Black Spot");
        assert!(outcome.treatment.is_some());
        let calls = api.calls.borrow();
        assert!(calls.contains(&"treat:Black Spot:Rose".to_string()));
    }

    #[test]
    fn both_image_flows_receive_the_same_photo() {
        let api = StubApi::healthy();
        block_on(run_analysis(&api, PHOTO)).unwrap();

        let calls = api.calls.borrow();
        assert!(calls.contains(&format!("identify:{PHOTO}")));
        assert!(calls.contains(&format!("detect:{PHOTO}")));
    }

    #[test]
    fn identify_failure_fails_the_whole_analysis() {
        let api = StubApi::failing(Fail::Identify);
        let error = block_on(run_analysis(&api, PHOTO)).unwrap_err();

        assert_eq!(error, AnalysisError("identify failed".to_string()));
        let calls = api.calls.borrow();
        assert!(!calls.iter().any(|c| c.starts_with("treat:")));
    }

    #[test]
    fn detect_failure_fails_the_whole_analysis() {
        let api = StubApi::failing(Fail::Detect);
        assert!(block_on(run_analysis(&api, PHOTO)).is_err());

        let calls = api.calls.borrow();
        assert!(!calls.iter().any(|c| c.starts_with("treat:")));
    }

    #[test]
    fn treatment_failure_surfaces_as_analysis_failure() {
        let api = StubApi::failing(Fail::Treatment);
        let error = block_on(run_analysis(&api, PHOTO)).unwrap_err();
        assert_eq!(error, AnalysisError("treatment failed".to_string()));
    }

    #[test]
    fn repeated_analysis_is_deterministic() {
        let api = StubApi::diseased();
        let first = block_on(run_analysis(&api, PHOTO)).unwrap();
        let second = block_on(run_analysis(&api, PHOTO)).unwrap();
        assert_eq!(first, second);
    }
}
