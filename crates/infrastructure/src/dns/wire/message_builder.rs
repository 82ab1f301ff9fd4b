//! DNS Message Builder
//!
//! Constructs DNS query messages in wire format using `hickory-proto`.

use super::record_type_map::RecordTypeMapper;
use axfr_sweep_domain::{DomainError, RecordType};
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::str::FromStr;

/// Builds DNS query messages in wire format
pub struct MessageBuilder;

impl MessageBuilder {
    /// Build a recursive query for `record_type` and return the random message
    /// ID alongside the serialized bytes.
    ///
    /// Creates a standard query with:
    /// - Random ID for request/response matching
    /// - RD (Recursion Desired) flag set
    /// - Single IN-class question section
    pub fn build_query(domain: &str, record_type: RecordType) -> Result<(u16, Vec<u8>), DomainError> {
        let id = fastrand::u16(..);
        let bytes = Self::build_query_with_id(id, domain, record_type)?;
        Ok((id, bytes))
    }

    /// Same as [`MessageBuilder::build_query`] with a caller-chosen ID.
    pub fn build_query_with_id(
        id: u16,
        domain: &str,
        record_type: RecordType,
    ) -> Result<Vec<u8>, DomainError> {
        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(Self::question(domain, record_type)?);

        Self::serialize_message(&message)
    }

    /// Build a zone transfer request. Recursion is not requested: AXFR is
    /// answered by the authoritative server itself.
    pub fn build_axfr(domain: &str) -> Result<(u16, Vec<u8>), DomainError> {
        let id = fastrand::u16(..);

        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(false);
        message.add_query(Self::question(domain, RecordType::AXFR)?);

        let bytes = Self::serialize_message(&message)?;
        Ok((id, bytes))
    }

    fn question(domain: &str, record_type: RecordType) -> Result<Query, DomainError> {
        let name = Name::from_str(domain).map_err(|e| {
            DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", domain, e))
        })?;

        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(RecordTypeMapper::to_hickory(record_type));
        query.set_query_class(DNSClass::IN);
        Ok(query)
    }

    /// Serialize a Message to wire format bytes
    fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }
}
