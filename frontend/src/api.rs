use gloo_console::error;
use gloo_net::http::Request;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::{
    AnalysisApi, AnalysisError, DiseaseRequest, DiseaseResponse, HistoryEntry, SpeciesRequest,
    SpeciesResponse, TreatmentRequest, TreatmentResponse,
};

/// Flow invocations over the backend HTTP API. Stateless; any implementation
/// honoring the schemas can stand in for it (tests use stubs).
pub struct HttpApi;

impl AnalysisApi for HttpApi {
    async fn identify_species(
        &self,
        request: SpeciesRequest,
    ) -> Result<SpeciesResponse, AnalysisError> {
        post_flow("/api/flows/identify-species", &request).await
    }

    async fn detect_disease(
        &self,
        request: DiseaseRequest,
    ) -> Result<DiseaseResponse, AnalysisError> {
        post_flow("/api/flows/detect-disease", &request).await
    }

    async fn recommend_treatment(
        &self,
        request: TreatmentRequest,
    ) -> Result<TreatmentResponse, AnalysisError> {
        post_flow("/api/flows/recommend-treatment", &request).await
    }
}

async fn post_flow<Req, Resp>(path: &str, request: &Req) -> Result<Resp, AnalysisError>
where
    Req: Serialize,
    Resp: DeserializeOwned,
{
    let response = Request::post(path)
        .json(request)
        .map_err(|e| AnalysisError(format!("Failed to build request: {e}")))?
        .send()
        .await
        .map_err(|e| {
            error!(format!("Fetch error: {e:?}"));
            AnalysisError(format!("Network error: {e}"))
        })?;

    if response.ok() {
        response
            .json::<Resp>()
            .await
            .map_err(|e| AnalysisError(format!("Failed to parse response: {e}")))
    } else {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(AnalysisError(format!("Server error: {status} - {body}")))
    }
}

pub async fn fetch_history() -> Result<Vec<HistoryEntry>, AnalysisError> {
    let response = Request::get("/api/history").send().await.map_err(|e| {
        error!(format!("Fetch error: {e:?}"));
        AnalysisError(format!("Network error: {e}"))
    })?;

    if response.ok() {
        response
            .json::<Vec<HistoryEntry>>()
            .await
            .map_err(|e| AnalysisError(format!("Failed to parse response: {e}")))
    } else {
        Err(AnalysisError(format!("Server error: {}", response.status())))
    }
}
