pub mod credentials;
pub mod session_manager;
