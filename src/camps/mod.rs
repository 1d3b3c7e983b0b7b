//! Camp listing management: CRUD over camp records and their embedded
//! images.

pub mod handlers;
