use std::fs::File;
use std::io::BufWriter;

/// Append-only writer over daily event files (`events-YYYYMMDD.log`).
///
/// Owned by the record worker task; never shared.
#[derive(Debug)]
pub struct RecordSink {
    pub directory: String,
    pub current_date: String,
    pub writer: Option<BufWriter<File>>,
}
