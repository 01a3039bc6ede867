pub mod discovery;
pub mod json_loader;

pub use discovery::{discover_banks, BankTarget};
pub use json_loader::{load_bank, render_bank, save_bank};
