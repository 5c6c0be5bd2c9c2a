pub mod admin;
pub mod init;
pub mod issuer;
pub mod student;
pub mod verify;
