//! Workspace root. The member crates carry the functionality; the tests
//! in `tests/` exercise them composed together.
