use actix_files::Files;
use actix_web::{HttpResponse, web};
use log::error;
use serde::Serialize;
use shared::{DiseaseRequest, ErrorResponse, SpeciesRequest, TreatmentRequest};

use crate::flows::{self, FlowError, GeminiClient};
use crate::history;

pub fn configure_routes(cfg: &mut web::ServiceConfig, frontend_dir: String) {
    cfg.service(
        web::resource("/api/flows/identify-species").route(web::post().to(identify_species)),
    )
    .service(web::resource("/api/flows/detect-disease").route(web::post().to(detect_disease)))
    .service(
        web::resource("/api/flows/recommend-treatment").route(web::post().to(recommend_treatment)),
    )
    .service(web::resource("/api/history").route(web::get().to(get_history)))
    .service(Files::new("/static", frontend_dir));
}

async fn identify_species(
    client: web::Data<GeminiClient>,
    request: web::Json<SpeciesRequest>,
) -> HttpResponse {
    respond(flows::identify_species().run(&client, &request).await)
}

async fn detect_disease(
    client: web::Data<GeminiClient>,
    request: web::Json<DiseaseRequest>,
) -> HttpResponse {
    respond(flows::detect_disease().run(&client, &request).await)
}

async fn recommend_treatment(
    client: web::Data<GeminiClient>,
    request: web::Json<TreatmentRequest>,
) -> HttpResponse {
    respond(flows::recommend_treatment().run(&client, &request).await)
}

async fn get_history() -> HttpResponse {
    HttpResponse::Ok().json(history::sample_history())
}

/// Validation failures are the caller's fault (400); anything else means the
/// model boundary failed (502). Either way a single short message goes out.
fn respond<T: Serialize>(result: Result<T, FlowError>) -> HttpResponse {
    match result {
        Ok(output) => HttpResponse::Ok().json(output),
        Err(e) if e.is_validation() => {
            error!("Rejected flow request: {}", e);
            HttpResponse::BadRequest().json(ErrorResponse {
                error: e.to_string(),
            })
        }
        Err(e) => {
            error!("Flow failed: {}", e);
            HttpResponse::BadGateway().json(ErrorResponse {
                error: e.to_string(),
            })
        }
    }
}
