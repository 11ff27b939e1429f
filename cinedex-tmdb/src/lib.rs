pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod images;

pub use catalog::Catalog;
pub use client::TmdbClient;
pub use config::{
    ConfigSources, ImageConfig, TmdbConfig, ValueSource, config_path, config_sources,
    default_data_dir,
};
pub use error::CatalogError;
pub use images::{ImageKind, image_url, local_image_path};
