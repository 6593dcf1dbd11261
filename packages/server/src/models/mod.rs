pub mod recipe;
pub mod shared;
