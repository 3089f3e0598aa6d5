pub mod support;

mod loader_tests;
