#![allow(dead_code)]

pub use pertdag_test_utils::builders;
pub use pertdag_test_utils::init_tracing;
