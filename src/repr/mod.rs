//! Runtime model representations.

pub mod gbdt;
