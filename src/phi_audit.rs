// PHI audit: static analysis tests that scan all Rust source files for
// tracing:: calls carrying clinical content or patient identity fields.
// Log lines may name opaque ids only.
