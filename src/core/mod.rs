//! Article pipeline: document stores, metadata and excerpt extraction,
//! article assembly and collection building

pub mod article;
pub mod collection;
pub mod config;
pub mod date;
pub mod error;
pub mod excerpt;
pub mod metadata;
pub mod store;
