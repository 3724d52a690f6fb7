//! Integration test modules

mod gesture_tests;
