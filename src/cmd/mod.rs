pub mod init;
pub mod markers;
pub mod root;
pub mod summary;
