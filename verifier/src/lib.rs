pub mod detector;
pub mod image;
pub mod io;
pub mod verify;
