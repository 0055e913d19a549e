//! Integration tests for collage.
//!
//! These tests drive a `Studio` through complete workflows the way a host
//! would: pointer events, poll ticks and awaited capture jobs.

mod capture_workflow_tests;
