//! Unit tests for step definitions, matching, and dispatch.
