#![allow(dead_code)]

pub mod failing_store;
pub mod provider_stub;
pub mod utils;
