//! Property-based tests for identifier and component invariants
