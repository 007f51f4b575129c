#![allow(dead_code)]

mod builders;
mod fake_upstream;

pub use builders::*;
pub use fake_upstream::*;
