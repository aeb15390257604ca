mod upload_photo;

pub use upload_photo::upload_photo_handler;
