use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use company_portal::config::EnvironmentConfig;
use company_portal::utils::jwt::{generate_internal_token, generate_token, JwtConfig};
use company_portal::{create_app_router, AppState};

fn test_app() -> Router {
    create_app_router(AppState::in_memory(EnvironmentConfig::default()))
}

fn internal_token(username: &str) -> String {
    let config = JwtConfig::from(&EnvironmentConfig::default());
    generate_internal_token(username, &config).unwrap()
}

fn pdf_data_url(text: &str) -> String {
    let bytes = format!("%PDF-1.4\n{}", text);
    format!("data:application/pdf;base64,{}", STANDARD.encode(bytes))
}

fn legal_entity_payload() -> Value {
    json!({
        "tipoPessoa": "JURIDICA",
        "razaoSocial": "Porto Seguro Logística Ltda",
        "cnpj": "11222333000181",
        "nomeFantasia": "Porto Seguro",
        "perfil": "AGENTE_CARGA",
        "faturamentoDireto": true,
        "documentoComprobatorio": pdf_data_url("contrato social")
    })
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>, token: Option<&str>) -> (StatusCode, Value) {
    let (status, bytes, _) = send_raw(app, method, uri, body, token).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> (StatusCode, Vec<u8>, Option<String>) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = response.into_body().collect().await.unwrap().to_bytes().to_vec();
    (status, bytes, content_type)
}

async fn create_company(app: &Router, payload: Value) -> Value {
    let (status, body) = send(app, Method::POST, "/companies", Some(payload), None).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["data"].clone()
}

#[tokio::test]
async fn test_health_check() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_create_company_returns_created_and_pending() {
    let app = test_app();
    let (status, body) = send(&app, Method::POST, "/companies", Some(legal_entity_payload()), None).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Empresa cadastrada com sucesso");
    let data = &body["data"];
    assert_eq!(data["status"], "PENDENTE");
    assert_eq!(data["tipoPessoa"], "JURIDICA");
    assert_eq!(data["cnpj"], "11222333000181");
    assert_eq!(data["faturamentoDireto"], true);
    assert!(data["motivoReprovacao"].is_null());
    assert!(data["documentoOpcional"].is_null());
    let id = data["id"].as_str().unwrap();
    assert_eq!(
        data["documentoComprobatorio"]["url"],
        format!("/companies/{}/documents/comprobatorio", id)
    );
}

#[tokio::test]
async fn test_internal_submission_requires_internal_token() {
    let app = test_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/companies?internal=true",
        Some(legal_entity_payload()),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_internal_submission_is_approved() {
    let app = test_app();
    let token = internal_token("ana.revisora");
    let (status, body) = send(
        &app,
        Method::POST,
        "/companies?internal=true",
        Some(legal_entity_payload()),
        Some(&token),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "APROVADA");
    assert_eq!(body["data"]["usuarioResponsavel"], "ana.revisora");
}

#[tokio::test]
async fn test_non_internal_role_cannot_use_internal_circuit() {
    let app = test_app();
    let config = JwtConfig::from(&EnvironmentConfig::default());
    let token = generate_token("visitante", "viewer", &config).unwrap();
    let (status, _) = send(
        &app,
        Method::POST,
        "/companies?internal=true",
        Some(legal_entity_payload()),
        Some(&token),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_invalid_token_is_unauthorized() {
    let app = test_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/companies",
        Some(legal_entity_payload()),
        Some("nao.e.um.token"),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_invalid_internal_query_is_bad_request() {
    let app = test_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/companies?internal=talvez",
        Some(legal_entity_payload()),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_create_rejects_invalid_cnpj() {
    let app = test_app();
    let mut payload = legal_entity_payload();
    payload["cnpj"] = json!("11222333000182");

    let (status, body) = send(&app, Method::POST, "/companies", Some(payload), None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_IDENTIFIER");
    assert_eq!(body["message"], "CNPJ fornecido inválido");
}

#[tokio::test]
async fn test_create_rejects_unknown_profile() {
    let app = test_app();
    let mut payload = legal_entity_payload();
    payload["perfil"] = json!("PIRATA");

    let (status, body) = send(&app, Method::POST, "/companies", Some(payload), None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_create_requires_supporting_document() {
    let app = test_app();
    let mut payload = legal_entity_payload();
    payload.as_object_mut().unwrap().remove("documentoComprobatorio");

    let (status, body) = send(&app, Method::POST, "/companies", Some(payload), None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(
        body["message"],
        "É necessário enviar os arquivos obrigatórios para prosseguir"
    );
}

#[tokio::test]
async fn test_create_rejects_duplicate_documents() {
    let app = test_app();
    let mut payload = legal_entity_payload();
    payload["documentoOpcional"] = payload["documentoComprobatorio"].clone();

    let (status, body) = send(&app, Method::POST, "/companies", Some(payload), None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "DUPLICATE_DOCUMENT");
    assert_eq!(body["message"], "Arquivo duplicado");
}

#[tokio::test]
async fn test_get_unknown_or_malformed_id_is_not_found() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::GET,
        "/companies/6f1c2d6e-8a0b-4f57-9a53-2d7c1b0e9f11",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Empresa não encontrada");

    let (status, _) = send(&app, Method::GET, "/companies/123", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::PATCH, "/companies/123/approve", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let app = test_app();
    let first = create_company(&app, legal_entity_payload()).await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = create_company(&app, legal_entity_payload()).await;

    let (status, body) = send(&app, Method::GET, "/companies", None, None).await;

    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["id"], second["id"]);
    assert_eq!(list[1]["id"], first["id"]);
}

#[tokio::test]
async fn test_approve_then_reject() {
    let app = test_app();
    let company = create_company(&app, legal_entity_payload()).await;
    let id = company["id"].as_str().unwrap();

    let (status, body) = send(&app, Method::PATCH, &format!("/companies/{}/approve", id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Empresa aprovada com sucesso");
    assert_eq!(body["data"]["status"], "APROVADA");

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/companies/{}/reject", id),
        Some(json!({ "motivo": "Documento ilegível" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Empresa reprovada com sucesso");
    assert_eq!(body["data"]["status"], "REPROVADA");
    assert_eq!(body["data"]["motivoReprovacao"], "Documento ilegível");

    let (_, body) = send(&app, Method::PATCH, &format!("/companies/{}/approve", id), None, None).await;
    assert_eq!(body["data"]["status"], "APROVADA");
    assert!(body["data"]["motivoReprovacao"].is_null());
}

#[tokio::test]
async fn test_reject_requires_reason() {
    let app = test_app();
    let company = create_company(&app, legal_entity_payload()).await;
    let id = company["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/companies/{}/reject", id),
        Some(json!({ "motivo": "   " })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (_, body) = send(&app, Method::GET, &format!("/companies/{}", id), None, None).await;
    assert_eq!(body["status"], "PENDENTE");
}

#[tokio::test]
async fn test_reject_unknown_company_is_not_found() {
    let app = test_app();
    let (status, _) = send(
        &app,
        Method::PATCH,
        "/companies/6f1c2d6e-8a0b-4f57-9a53-2d7c1b0e9f11/reject",
        Some(json!({})),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_patches_given_fields() {
    let app = test_app();
    let company = create_company(&app, legal_entity_payload()).await;
    let id = company["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/companies/{}", id),
        Some(json!({ "nomeFantasia": "Porto Seguro Cargas", "perfil": "ARMADOR" })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Empresa atualizada com sucesso");
    let data = &body["data"];
    assert_eq!(data["nomeFantasia"], "Porto Seguro Cargas");
    assert_eq!(data["perfil"], "ARMADOR");
    assert_eq!(data["razaoSocial"], company["razaoSocial"]);
    assert_eq!(data["createdAt"], company["createdAt"]);
    assert_eq!(data["status"], "PENDENTE");
}

#[tokio::test]
async fn test_responsible_user_is_set_only_by_internal_users() {
    let app = test_app();
    let mut payload = legal_entity_payload();
    payload["usuarioResponsavel"] = json!("fake.admin");
    let company = create_company(&app, payload).await;
    assert_eq!(company["usuarioResponsavel"], Value::Null);
    let uri = format!("/companies/{}", company["id"].as_str().unwrap());

    let (status, body) = send(
        &app,
        Method::PATCH,
        &uri,
        Some(json!({ "usuarioResponsavel": "fake.admin" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["usuarioResponsavel"], Value::Null);

    let token = internal_token("ana.revisora");
    let (status, body) = send(
        &app,
        Method::PATCH,
        &uri,
        Some(json!({ "usuarioResponsavel": "carlos.revisor" })),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["usuarioResponsavel"], "carlos.revisor");
}

#[tokio::test]
async fn test_update_rejects_invalid_cpf_change() {
    let app = test_app();
    let company = create_company(&app, legal_entity_payload()).await;
    let id = company["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/companies/{}", id),
        Some(json!({ "tipoPessoa": "FISICA", "nome": "Maria da Silva", "cpf": "11111111111" })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_IDENTIFIER");
}

#[tokio::test]
async fn test_document_download() {
    let app = test_app();
    let company = create_company(&app, legal_entity_payload()).await;
    let id = company["id"].as_str().unwrap();

    let (status, bytes, content_type) = send_raw(
        &app,
        Method::GET,
        &format!("/companies/{}/documents/comprobatorio", id),
        None,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/pdf"));
    assert_eq!(bytes, b"%PDF-1.4\ncontrato social".to_vec());

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/companies/{}/documents/opcional", id),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/companies/{}/documents/outro", id),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/companies")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ nao e json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
