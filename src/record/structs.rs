pub mod record_sink;
pub mod snatch_record;
