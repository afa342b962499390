pub mod document_store;
pub mod session_store;
