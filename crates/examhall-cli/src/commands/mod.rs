pub mod init;
pub mod simulate;
