use hickory_proto::rr::Record;
use std::io::{BufWriter, Write};

/// Write each record in zone-file form, one per line.
pub fn print_records<W: Write>(writer: W, records: &[Record]) -> std::io::Result<()> {
    let mut out = BufWriter::new(writer);
    for record in records {
        writeln!(out, "{}", record)?;
    }
    out.flush()
}
