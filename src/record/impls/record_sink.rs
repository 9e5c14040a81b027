use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::sync::Arc;
use log::{error, info, warn};
use tokio::sync::watch;
use crate::record::structs::record_sink::RecordSink;
use crate::record::structs::snatch_record::SnatchRecord;
use crate::tracker::structs::torrent_tracker::TorrentTracker;

impl RecordSink {
    pub fn new(directory: &str) -> RecordSink {
        RecordSink {
            directory: directory.to_string(),
            current_date: String::new(),
            writer: None,
        }
    }

    /// Appends one snatch to the current day's event file, rolling over to a
    /// new file when the local date changes.
    pub fn append(&mut self, record: &SnatchRecord) {
        let date = chrono::Local::now().format("%Y%m%d").to_string();
        if self.writer.is_none() || self.current_date != date {
            self.flush();
            match self.open_file(&date) {
                Ok(file) => {
                    self.writer = Some(BufWriter::new(file));
                    self.current_date = date;
                }
                Err(error) => {
                    error!("[RECORD] Unable to open event file: {error}");
                    return;
                }
            }
        }
        if let Some(writer) = self.writer.as_mut() {
            if let Err(error) = writeln!(
                writer,
                "{} {} {} {}:{}",
                record.completed_at, record.user_id, record.torrent_id, record.ip, record.port
            ) {
                warn!("[RECORD] Unable to append event: {error}");
            }
        }
    }

    pub fn flush(&mut self) {
        if let Some(writer) = self.writer.as_mut() {
            if let Err(error) = writer.flush() {
                warn!("[RECORD] Unable to flush event file: {error}");
            }
        }
    }

    fn open_file(&self, date: &str) -> Result<File, std::io::Error> {
        create_dir_all(&self.directory)?;
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(format!("{}/events-{date}.log", self.directory))
    }

    /// Drains the snatch record channel into the daily event files. Flushes
    /// after every batch of queued records and once more on shutdown.
    pub async fn worker(tracker: Arc<TorrentTracker>, mut shutdown: watch::Receiver<bool>) {
        let mut sink = RecordSink::new(&tracker.config.tracker_config.record_directory);
        let receiver = tracker.sync.records_rx.clone();
        let mut receiver = receiver.lock().await;
        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    while let Ok(record) = receiver.try_recv() {
                        sink.append(&record);
                    }
                    sink.flush();
                    info!("[RECORD] Worker stopped");
                    return;
                }
                record = receiver.recv() => {
                    if let Some(record) = record {
                        sink.append(&record);
                        while let Ok(record) = receiver.try_recv() {
                            sink.append(&record);
                        }
                        sink.flush();
                    }
                }
            }
        }
    }
}
