pub mod enumerate;
pub mod query_record;
pub mod sweep;
pub mod zone_transfer;

pub use enumerate::{EnumerateRecordsUseCase, Enumeration, EnumerationStrategy};
pub use query_record::{QueryRecordUseCase, RetryPolicy};
pub use sweep::SweepRecordsUseCase;
pub use zone_transfer::ZoneTransferUseCase;
