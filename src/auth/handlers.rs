use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use crate::AppState;
use crate::error::AppError;
use tracing::{info, error};

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: String,
    pub token: String,
}

pub async fn signup(
    req: web::Json<SignupRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received signup request for username: {}", req.username);
    match state.auth_service.signup(&req.username, &req.password).await {
        Ok(authenticated) => {
            info!("Signup successful for username: {}", authenticated.username);
            Ok(HttpResponse::Created().json(AuthResponse {
                user: authenticated.username,
                token: authenticated.token,
            }))
        }
        Err(e) => {
            error!("Signup failed for username: {}: {}", req.username, e);
            Err(e)
        }
    }
}

pub async fn login(
    req: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received login request for username: {}", req.username);
    match state.auth_service.login(&req.username, &req.password).await {
        Ok(authenticated) => {
            info!("Login successful for username: {}", authenticated.username);
            Ok(HttpResponse::Ok().json(AuthResponse {
                user: authenticated.username,
                token: authenticated.token,
            }))
        }
        Err(e) => {
            error!("Login failed for username: {}: {}", req.username, e);
            Err(e)
        }
    }
}
