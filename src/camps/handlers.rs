use actix_web::{web, HttpResponse};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::db::models::{Camp, CampImage, CampUpdate, NewCamp};
use crate::error::{AppError, DatabaseError};
use crate::AppState;

// Uploads larger than this are rejected outright
const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Deserialize)]
pub struct ImagePayload {
    /// Base64-encoded image bytes
    pub data: String,
    pub content_type: String,
    pub filename: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateCampRequest {
    pub title: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image: Option<ImagePayload>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCampRequest {
    pub title: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image: Option<ImagePayload>,
}

/// Image metadata sent in place of the raw buffer to keep payloads small.
#[derive(Debug, Serialize)]
pub struct ImageInfo {
    pub content_type: String,
    pub filename: String,
    pub has_data: bool,
}

#[derive(Debug, Serialize)]
pub struct CampResponse {
    pub id: Uuid,
    pub title: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image: Option<ImageInfo>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Camp> for CampResponse {
    fn from(camp: Camp) -> Self {
        Self {
            id: camp.id,
            title: camp.title,
            location: camp.location,
            description: camp.description,
            price: camp.price,
            image: camp.image.map(|image| ImageInfo {
                content_type: image.content_type,
                filename: image.filename,
                has_data: !image.data.is_empty(),
            }),
            created_at: camp.created_at,
            updated_at: camp.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateCampResponse {
    pub success: bool,
    pub data: CampResponse,
    pub message: String,
}

fn decode_image(payload: ImagePayload) -> Result<CampImage, AppError> {
    if !payload.content_type.starts_with("image/") {
        return Err(AppError::ValidationError("Only images are allowed".into()));
    }

    let data = BASE64
        .decode(payload.data.as_bytes())
        .map_err(|_| AppError::ValidationError("Image data is not valid base64".into()))?;

    if data.len() > MAX_IMAGE_BYTES {
        return Err(AppError::ValidationError(
            "File size too large. Maximum 5MB allowed".into(),
        ));
    }

    Ok(CampImage {
        data,
        content_type: payload.content_type,
        filename: payload.filename,
    })
}

pub async fn list_camps(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let camps = state.camps.list_camps().await?;
    let response: Vec<CampResponse> = camps.into_iter().map(CampResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

pub async fn get_camp(
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let camp = state
        .camps
        .get_camp(path.into_inner())
        .await?
        .ok_or(AppError::DatabaseError(DatabaseError::NotFound))?;

    Ok(HttpResponse::Ok().json(CampResponse::from(camp)))
}

pub async fn create_camp(
    req: web::Json<CreateCampRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let req = req.into_inner();

    let (title, location, description, price) = match (req.title, req.location, req.description, req.price) {
        (Some(title), Some(location), Some(description), Some(price))
            if !title.is_empty() && !location.is_empty() && !description.is_empty() =>
        {
            (title, location, description, price)
        }
        _ => {
            return Err(AppError::ValidationError(
                "All fields (title, location, description, price) are required".into(),
            ));
        }
    };

    let image = req.image.map(decode_image).transpose()?;

    let camp = state
        .camps
        .create_camp(NewCamp {
            title,
            location,
            description,
            price,
            image,
        })
        .await?;

    info!("Created camp {} ({})", camp.title, camp.id);

    Ok(HttpResponse::Created().json(CreateCampResponse {
        success: true,
        data: camp.into(),
        message: "Camp created successfully".to_string(),
    }))
}

pub async fn update_camp(
    path: web::Path<Uuid>,
    req: web::Json<UpdateCampRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let req = req.into_inner();
    let image = req.image.map(decode_image).transpose()?;

    let update = CampUpdate {
        title: req.title,
        location: req.location,
        description: req.description,
        price: req.price,
        image,
    };

    let camp = state
        .camps
        .update_camp(path.into_inner(), update)
        .await?
        .ok_or(AppError::DatabaseError(DatabaseError::NotFound))?;

    Ok(HttpResponse::Ok().json(CampResponse::from(camp)))
}

pub async fn delete_camp(
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let deleted = state.camps.delete_camp(id).await?;
    if !deleted {
        return Err(AppError::DatabaseError(DatabaseError::NotFound));
    }

    info!("Deleted camp {}", id);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Camp deleted successfully"
    })))
}

pub async fn get_camp_image(
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let camp = state
        .camps
        .get_camp(path.into_inner())
        .await?
        .ok_or(AppError::DatabaseError(DatabaseError::NotFound))?;

    let image = camp
        .image
        .filter(|image| !image.data.is_empty())
        .ok_or(AppError::DatabaseError(DatabaseError::NotFound))?;

    Ok(HttpResponse::Ok()
        .content_type(image.content_type)
        .insert_header((
            "Content-Disposition",
            format!("inline; filename=\"{}\"", image.filename),
        ))
        .body(image.data))
}
