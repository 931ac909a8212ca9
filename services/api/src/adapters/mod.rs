pub mod db;
pub mod hf_llm;

pub use db::DbAdapter;
pub use hf_llm::HuggingFaceAdapter;
