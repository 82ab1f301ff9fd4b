use std::fmt;
use std::str::FromStr;

/// Registry mnemonic of a variant, when it is not a valid Rust identifier.
macro_rules! mnemonic {
    ($variant:ident) => {
        stringify!($variant)
    };
    ($variant:ident $name:literal) => {
        $name
    };
}

/// Declares the record type universe once so that the mnemonic, the wire code
/// and `RecordType::ALL` can never drift apart.
macro_rules! record_types {
    ($($variant:ident = $code:literal $(=> $name:literal)?),+ $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum RecordType {
            $($variant),+
        }

        impl RecordType {
            /// Every record type the client knows, in registry order.
            pub const ALL: &'static [RecordType] = &[$(RecordType::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(RecordType::$variant => mnemonic!($variant $($name)?)),+
                }
            }

            pub fn to_u16(&self) -> u16 {
                match self {
                    $(RecordType::$variant => $code),+
                }
            }

            pub fn from_u16(code: u16) -> Option<Self> {
                match code {
                    $($code => Some(RecordType::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

record_types! {
    A = 1,
    NS = 2,
    MD = 3,
    MF = 4,
    CNAME = 5,
    SOA = 6,
    MB = 7,
    MG = 8,
    MR = 9,
    NULL = 10,
    WKS = 11,
    PTR = 12,
    HINFO = 13,
    MINFO = 14,
    MX = 15,
    TXT = 16,
    RP = 17,
    AFSDB = 18,
    X25 = 19,
    ISDN = 20,
    RT = 21,
    NSAPPTR = 23 => "NSAP-PTR",
    SIG = 24,
    KEY = 25,
    PX = 26,
    GPOS = 27,
    AAAA = 28,
    LOC = 29,
    NXT = 30,
    EID = 31,
    NIMLOC = 32,
    SRV = 33,
    ATMA = 34,
    NAPTR = 35,
    KX = 36,
    CERT = 37,
    DNAME = 39,
    OPT = 41,
    APL = 42,
    DS = 43,
    SSHFP = 44,
    IPSECKEY = 45,
    RRSIG = 46,
    NSEC = 47,
    DNSKEY = 48,
    DHCID = 49,
    NSEC3 = 50,
    NSEC3PARAM = 51,
    TLSA = 52,
    SMIMEA = 53,
    HIP = 55,
    NINFO = 56,
    RKEY = 57,
    TALINK = 58,
    CDS = 59,
    CDNSKEY = 60,
    OPENPGPKEY = 61,
    CSYNC = 62,
    ZONEMD = 63,
    SVCB = 64,
    HTTPS = 65,
    SPF = 99,
    UINFO = 100,
    UID = 101,
    GID = 102,
    UNSPEC = 103,
    NID = 104,
    L32 = 105,
    L64 = 106,
    LP = 107,
    EUI48 = 108,
    EUI64 = 109,
    TKEY = 249,
    TSIG = 250,
    IXFR = 251,
    AXFR = 252,
    MAILB = 253,
    MAILA = 254,
    ANY = 255,
    URI = 256,
    CAA = 257,
    AVC = 258,
    AMTRELAY = 260,
    TA = 32768,
    DLV = 32769,
}

/// Pseudo-types never queried one by one: ANY is a wildcard and AXFR is
/// attempted separately as a zone transfer.
const SWEEP_EXCLUDED: [RecordType; 2] = [RecordType::ANY, RecordType::AXFR];

impl RecordType {
    pub fn is_sweep_excluded(&self) -> bool {
        SWEEP_EXCLUDED.contains(self)
    }

    /// Every type in [`RecordType::ALL`] that a sweep queries individually.
    pub fn sweepable() -> impl Iterator<Item = RecordType> {
        Self::ALL
            .iter()
            .copied()
            .filter(|record_type| !record_type.is_sweep_excluded())
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|record_type| record_type.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown record type: {}", s))
    }
}
