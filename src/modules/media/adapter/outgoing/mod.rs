mod image_store_gcs;

pub use image_store_gcs::GcsImageStore;
