pub mod errors;
pub mod filesystem;
pub mod logging;
pub mod permissions;
