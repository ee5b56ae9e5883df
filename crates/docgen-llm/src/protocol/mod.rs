//! Wire types for remote generation endpoints.

pub mod openai;
