//! Application use cases

pub mod evaluate;

pub use evaluate::{EvaluateError, EvaluateMode, EvaluateQuestionUseCase};
