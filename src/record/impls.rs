pub mod record_sink;
