#![allow(unused_imports)]

pub use flowsched_test_utils::builders;
pub use flowsched_test_utils::{init_tracing, same_set};
