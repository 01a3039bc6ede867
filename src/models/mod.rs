pub mod bank;
pub mod loaders;
pub mod question;
pub mod slot;

pub use bank::QuestionBank;
pub use loaders::{discover_banks, load_bank, save_bank, BankTarget};
pub use question::{Explanation, ExplanationShape, QuestionRecord};
pub use slot::Slot;
