//! Trusted contacts and the cached user account.

mod account;
mod trusted;

pub use account::UserAccount;
pub use trusted::{ContactError, TrustedContact, TrustedContactList};
