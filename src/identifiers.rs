//! Type-safe identifiers for protocol entities.
//!
//! Newtype wrappers prevent mixing incompatible IDs at compile time.
//!
//! # ID Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`RequestId`] | JSON-RPC request/response correlation |
//! | [`VolumeId`] | Server-assigned mounted volume handle |
//!
//! Request ids are plain integers drawn from a per-connection monotonic
//! counter: the server rejects requests whose `id` member is not an integer.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

// ============================================================================
// RequestId
// ============================================================================

/// Correlation id of a single JSON-RPC request.
///
/// Unique for the lifetime of one connection; never reused. Serialized as a
/// bare JSON integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(u64);

impl RequestId {
    /// Creates a request id from a raw integer.
    #[inline]
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw integer value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// RequestIdCounter
// ============================================================================

/// Monotonic source of fresh [`RequestId`]s.
///
/// Each connection owns one counter, so the id space restarts with every
/// session. Ids start at 1.
#[derive(Debug)]
pub struct RequestIdCounter(AtomicU64);

impl RequestIdCounter {
    /// Creates a counter whose first id is 1.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(AtomicU64::new(1))
    }

    /// Returns the next unused request id.
    #[inline]
    pub fn next(&self) -> RequestId {
        RequestId(self.0.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for RequestIdCounter {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// VolumeId
// ============================================================================

/// Server-assigned handle of a mounted volume.
///
/// Returned when a volume is created or mounted; consumed by unmount.
/// Opaque to the client beyond equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VolumeId(u64);

impl VolumeId {
    /// Creates a volume id from a raw integer.
    #[inline]
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw integer value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for VolumeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Tests
// ============================================================================
