use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};

use crate::controllers::company_controller::CompanyController;
use crate::dto::company_dto::{
    ApiResponse, CompanyResponse, CreateCompanyQuery, CreateCompanyRequest, RejectCompanyRequest,
    UpdateCompanyRequest,
};
use crate::middleware::{resolve_submission_role, ApiJson};
use crate::models::caller::CallerRole;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_company_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_company))
        .route("/", get(list_companies))
        .route("/:id", get(get_company))
        .route("/:id", patch(update_company))
        .route("/:id/approve", patch(approve_company))
        .route("/:id/reject", patch(reject_company))
        .route("/:id/documents/:kind", get(download_document))
}

async fn create_company(
    State(state): State<AppState>,
    query: Result<Query<CreateCompanyQuery>, QueryRejection>,
    caller: CallerRole,
    ApiJson(request): ApiJson<CreateCompanyRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CompanyResponse>>), AppError> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(format!("Parâmetro inválido: {}", e.body_text())))?;
    let caller = resolve_submission_role(caller, query.internal)?;

    let controller = CompanyController::new(&state);
    let response = controller.create(request, &caller).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_companies(
    State(state): State<AppState>,
) -> Result<Json<Vec<CompanyResponse>>, AppError> {
    let controller = CompanyController::new(&state);
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CompanyResponse>, AppError> {
    let controller = CompanyController::new(&state);
    let response = controller.get_by_id(&id).await?;
    Ok(Json(response))
}

async fn update_company(
    State(state): State<AppState>,
    Path(id): Path<String>,
    caller: CallerRole,
    ApiJson(request): ApiJson<UpdateCompanyRequest>,
) -> Result<Json<ApiResponse<CompanyResponse>>, AppError> {
    let controller = CompanyController::new(&state);
    let response = controller.update(&id, request, &caller).await?;
    Ok(Json(response))
}

async fn approve_company(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<CompanyResponse>>, AppError> {
    let controller = CompanyController::new(&state);
    let response = controller.approve(&id).await?;
    Ok(Json(response))
}

async fn reject_company(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<RejectCompanyRequest>,
) -> Result<Json<ApiResponse<CompanyResponse>>, AppError> {
    let controller = CompanyController::new(&state);
    let response = controller.reject(&id, request).await?;
    Ok(Json(response))
}

async fn download_document(
    State(state): State<AppState>,
    Path((id, kind)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let controller = CompanyController::new(&state);
    let document = controller.document(&id, &kind).await?;

    Ok((
        [
            (header::CONTENT_TYPE, document.content_type),
            (header::CACHE_CONTROL, "private, max-age=31536000, immutable".to_string()),
        ],
        document.content,
    ))
}
