pub mod mocks;

mod registry_tests;
