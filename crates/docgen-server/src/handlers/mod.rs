pub mod documentation;
pub mod health;
