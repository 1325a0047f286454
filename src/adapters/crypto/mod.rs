//! Cryptography adapters.

mod field_cipher;

pub use field_cipher::{CipherError, FieldCipher};
