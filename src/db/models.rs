use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered account. The password hash is opaque to everything but the
/// hasher and must never appear in a response body.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    pub fn new(username: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Binary image stored inline with its camp record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampImage {
    pub data: Vec<u8>,
    pub content_type: String,
    pub filename: String,
}

#[derive(Debug, Clone)]
pub struct Camp {
    pub id: Uuid,
    pub title: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image: Option<CampImage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating a camp.
#[derive(Debug, Clone)]
pub struct NewCamp {
    pub title: String,
    pub location: String,
    pub description: String,
    pub price: f64,
    pub image: Option<CampImage>,
}

/// Partial update; absent fields keep their stored values.
#[derive(Debug, Clone, Default)]
pub struct CampUpdate {
    pub title: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image: Option<CampImage>,
}

/// Flat row shape for sqlx; the image columns fold into `CampImage` only
/// when all three are present.
#[derive(Debug, FromRow)]
pub struct CampRow {
    pub id: Uuid,
    pub title: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image_data: Option<Vec<u8>>,
    pub image_content_type: Option<String>,
    pub image_filename: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CampRow> for Camp {
    fn from(row: CampRow) -> Self {
        let image = match (row.image_data, row.image_content_type, row.image_filename) {
            (Some(data), Some(content_type), Some(filename)) => Some(CampImage {
                data,
                content_type,
                filename,
            }),
            _ => None,
        };
        Self {
            id: row.id,
            title: row.title,
            location: row.location,
            description: row.description,
            price: row.price,
            image,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_new_assigns_fresh_ids() {
        let a = Account::new("alice".to_string(), "hash-a".to_string());
        let b = Account::new("bob".to_string(), "hash-b".to_string());
        assert_ne!(a.id, b.id);
        assert_eq!(a.created_at, a.updated_at);
    }

    #[test]
    fn test_account_serialization_omits_password_hash() {
        let account = Account::new("alice".to_string(), "$2b$12$secret".to_string());
        let json = serde_json::to_value(&account).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["username"], "alice");
    }

    #[test]
    fn test_camp_row_folds_image_columns() {
        let now = Utc::now();
        let row = CampRow {
            id: Uuid::new_v4(),
            title: "Lakeside".to_string(),
            location: Some("Finland".to_string()),
            description: None,
            price: Some(42.0),
            image_data: Some(vec![1, 2, 3]),
            image_content_type: Some("image/png".to_string()),
            image_filename: Some("lake.png".to_string()),
            created_at: now,
            updated_at: now,
        };
        let camp: Camp = row.into();
        let image = camp.image.expect("image should be present");
        assert_eq!(image.data, vec![1, 2, 3]);
        assert_eq!(image.content_type, "image/png");

        let row = CampRow {
            id: Uuid::new_v4(),
            title: "Bare".to_string(),
            location: None,
            description: None,
            price: None,
            image_data: None,
            image_content_type: None,
            image_filename: None,
            created_at: now,
            updated_at: now,
        };
        let camp: Camp = row.into();
        assert!(camp.image.is_none());
    }
}
