//! Verification Adapter - 认证编号来源实现

mod random_number_source;

pub use random_number_source::RandomVerificationNumbers;
