mod error;
mod traits;

pub mod document;
pub mod memory;

pub use document::DocumentRecipeStore;
pub use error::StorageError;
pub use memory::MemoryRecipeStore;
pub use traits::RecipeStore;
