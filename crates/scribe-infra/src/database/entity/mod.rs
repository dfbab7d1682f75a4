//! SeaORM entities mirroring the store's tables.

pub mod article;
pub mod category;
pub mod comment;
pub mod user;
