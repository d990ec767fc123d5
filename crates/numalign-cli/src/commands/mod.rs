pub mod init;
pub mod merge;
