//! Answer types: letters, provider slots, provider results, fingerprints

pub mod fingerprint;
pub mod letter;
pub mod response;
pub mod slot;

pub use fingerprint::Fingerprint;
pub use letter::AnswerLetter;
pub use response::ProviderAnswer;
pub use slot::ProviderSlot;
