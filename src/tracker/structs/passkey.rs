//! Per-user tracker passkey.

/// A 32-character user passkey embedded in the announce URL path
/// (`http://tracker.example.com/<passkey>/announce`).
///
/// Passkeys are opaque ASCII; the tracker only compares them against the
/// user set loaded from the database.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct PassKey(pub [u8; 32]);
