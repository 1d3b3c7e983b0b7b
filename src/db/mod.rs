//! Persistence layer: row models, store traits, and the Postgres-backed
//! implementation used by the running server.

pub mod models;
pub mod operations;

pub use models::{Account, Camp, CampImage, CampUpdate, NewCamp};
pub use operations::{CampStore, CredentialStore, DbOperations};
