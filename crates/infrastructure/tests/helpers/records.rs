use hickory_proto::rr::rdata::{A, MX, SOA, TXT};
use hickory_proto::rr::{Name, RData, Record};
use std::net::Ipv4Addr;
use std::str::FromStr;

fn name(value: &str) -> Name {
    Name::from_str(value).unwrap()
}

pub fn a_record(owner: &str, ip: Ipv4Addr) -> Record {
    Record::from_rdata(name(owner), 300, RData::A(A(ip)))
}

pub fn mx_record(owner: &str, preference: u16, exchange: &str) -> Record {
    Record::from_rdata(name(owner), 300, RData::MX(MX::new(preference, name(exchange))))
}

pub fn txt_record(owner: &str, text: &str) -> Record {
    Record::from_rdata(name(owner), 300, RData::TXT(TXT::new(vec![text.to_string()])))
}

pub fn soa_record(zone: &str) -> Record {
    Record::from_rdata(
        name(zone),
        7200,
        RData::SOA(SOA::new(
            name(&format!("ns1.{}", zone)),
            name(&format!("hostmaster.{}", zone)),
            2024010101,
            172800,
            900,
            1209600,
            3600,
        )),
    )
}
