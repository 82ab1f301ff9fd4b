pub mod enumeration;

// Re-export use cases
pub use enumeration::{
    EnumerateRecordsUseCase, Enumeration, EnumerationStrategy, QueryRecordUseCase, RetryPolicy,
    SweepRecordsUseCase, ZoneTransferUseCase,
};
