// Shared by several test binaries; each uses a different subset.
#![allow(dead_code)]

pub mod mocks;
pub mod test_helpers;
