//! Unit-test logging bootstrap; delegates to the shared test-support crate.

pub fn init() {
    engine_test_support::test_logging::init();
}
