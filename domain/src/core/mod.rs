//! Core domain types shared by all modules

pub mod error;
pub mod question;

pub use error::DomainError;
pub use question::QuizQuestion;
