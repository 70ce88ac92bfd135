pub mod admin;
pub mod backup;
pub mod debounce;
pub mod identity;
pub mod punch;
pub mod toggle;
