pub mod analysis;
pub mod data_uri;
pub mod schema;

pub use analysis::{AnalysisApi, AnalysisError, run_analysis};
pub use data_uri::{DataUri, DataUriError, MAX_UPLOAD_BYTES, check_upload_size};
pub use schema::{
    AnalysisOutcome, DiseaseRequest, DiseaseResponse, ErrorResponse, HealthStatus, HistoryEntry,
    SpeciesRequest, SpeciesResponse, TreatmentRequest, TreatmentResponse,
};
