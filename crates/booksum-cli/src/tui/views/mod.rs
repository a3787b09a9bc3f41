pub mod admin;
pub mod dashboard;
pub mod landing;
pub mod login;
pub mod register;
pub mod splash;
