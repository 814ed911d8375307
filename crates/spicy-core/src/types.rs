//! Shared value types.

/// Free-form JSON metadata carried by every record.
///
/// Callers attach arbitrary context (lock durations, NFT ids, campaign
/// tags); the services merge their own entries in and persist the object
/// verbatim, so snapshots written by the upstream system round-trip.
pub type Metadata = serde_json::Map<String, serde_json::Value>;
