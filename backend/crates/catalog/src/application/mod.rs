//! Application Layer
//!
//! Use cases orchestrating the discovery query model and repositories.

pub mod get_content;
pub mod list_content;
pub mod vocabulary;

pub use get_content::GetContentUseCase;
pub use list_content::{ContentPage, ListContentUseCase};
pub use vocabulary::VocabularyUseCase;
