pub mod backup;
pub mod config;
pub mod db;
pub mod export;
pub mod init;
pub mod location;
pub mod log;
pub mod punch;
pub mod reader;
pub mod scans;
pub mod sessions;
pub mod worker;
