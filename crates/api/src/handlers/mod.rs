pub mod projects;
pub mod prospects;
pub mod stream;
