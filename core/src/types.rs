//! Primitive ledger types

/// Participant or principal identifier
pub type Address = String;

/// Value in smallest accounting units
pub type Amount = u64;

/// Unix timestamp in seconds
pub type Timestamp = u64;
