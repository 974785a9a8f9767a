// flora_admin/src/services/mod.rs

//! Upload collaborators: image optimization and upload storage.
//! The product repository never calls into these; clients put the returned
//! URLs into a product's `images` list themselves.

pub mod images;
pub mod uploads;
