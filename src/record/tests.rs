#[cfg(test)]
mod record_tests {
    use std::net::Ipv4Addr;
    use crate::record::structs::record_sink::RecordSink;
    use crate::record::structs::snatch_record::SnatchRecord;

    #[test]
    fn test_record_sink_appends_and_rolls_daily_files() {
        let directory = tempfile::tempdir().unwrap();
        let mut sink = RecordSink::new(directory.path().to_str().unwrap());
        sink.append(&SnatchRecord {
            user_id: 7,
            torrent_id: 42,
            ip: Ipv4Addr::new(10, 0, 0, 1),
            port: 51413,
            completed_at: 1_700_000_000,
        });
        sink.flush();

        let date = chrono::Local::now().format("%Y%m%d").to_string();
        let path = directory.path().join(format!("events-{date}.log"));
        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(content, "1700000000 7 42 10.0.0.1:51413\n");
    }
}
