pub mod login;
pub mod logout;
pub mod register;
pub mod restore_session;
pub mod upload_images;

pub use login::LoginAction;
pub use logout::LogoutAction;
pub use register::RegisterAction;
pub use restore_session::RestoreSessionAction;
pub use upload_images::UploadImagesAction;
