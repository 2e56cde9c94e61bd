/// Describes pwdvault specific error types.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Error caused by missing or malformed caller input.
    Validation,
    /// Error caused by bad credentials or a missing/invalid/expired token.
    Authentication,
    /// Error caused by a ciphertext integrity failure.
    Decryption,
    /// Error caused by a storage connection or query failure.
    Storage,
    /// Unknown error.
    Unknown,
}
