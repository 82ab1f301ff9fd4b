//! Mapping from `axfr_sweep_domain::RecordType` to `hickory_proto::rr::RecordType`.
//!
//! Both sides are keyed by the IANA wire code, so the mapping goes through `u16`
//! instead of a match arm per type.

use axfr_sweep_domain::RecordType;
use hickory_proto::rr::RecordType as HickoryRecordType;

pub struct RecordTypeMapper;

impl RecordTypeMapper {
    /// Convert domain RecordType → hickory RecordType (for building queries)
    pub fn to_hickory(record_type: RecordType) -> HickoryRecordType {
        HickoryRecordType::from(record_type.to_u16())
    }
}
