//! Property-based tests for paging arithmetic.
