mod draft_store_file;

pub use draft_store_file::FileDraftStore;
