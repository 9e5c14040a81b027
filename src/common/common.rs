use crate::common::structs::custom_error::CustomError;
use crate::config::structs::configuration::Configuration;
use fern::colors::{Color, ColoredLevelConfig};
use log::info;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::fmt;
use std::fmt::Formatter;
use std::time::SystemTime;

pub type QueryValues = SmallVec<[Vec<u8>; 1]>;

/// Strict percent-decoding of one query component into raw bytes.
///
/// A `%` not followed by two hex digits fails the whole request, matching
/// what BitTorrent clients expect from a tracker that must reject mangled
/// binary `info_hash`/`peer_id` values instead of guessing.
#[inline]
pub fn percent_decode_bytes(data: &str) -> Result<Vec<u8>, CustomError> {
    let bytes = data.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut position = 0;
    while position < bytes.len() {
        match bytes[position] {
            b'%' => {
                if position + 2 >= bytes.len() {
                    return Err(CustomError::new("invalid percent encoding"));
                }
                let high = hex_to_nibble(bytes[position + 1]);
                let low = hex_to_nibble(bytes[position + 2]);
                if high == 0xFF || low == 0xFF {
                    return Err(CustomError::new("invalid percent encoding"));
                }
                decoded.push((high << 4) | low);
                position += 3;
            }
            other => {
                decoded.push(other);
                position += 1;
            }
        }
    }
    Ok(decoded)
}

#[inline]
pub fn parse_query(query: Option<String>) -> Result<HashMap<String, QueryValues>, CustomError> {
    let mut queries: HashMap<String, QueryValues> = HashMap::with_capacity(12);
    if let Some(result) = query {
        for query_item in result.split(['&', ';']) {
            if query_item.is_empty() {
                continue;
            }
            if let Some(equal_pos) = query_item.find('=') {
                let (key_part, value_part) = query_item.split_at(equal_pos);
                let key_bytes = percent_decode_bytes(key_part)?;
                let key_name = String::from_utf8_lossy(&key_bytes).to_lowercase();
                if key_name.is_empty() {
                    continue;
                }
                let value_data = percent_decode_bytes(&value_part[1..])?;
                queries
                    .entry(key_name)
                    .or_default()
                    .push(value_data);
            } else {
                let key_bytes = percent_decode_bytes(query_item)?;
                let key_name = String::from_utf8_lossy(&key_bytes).to_lowercase();
                if key_name.is_empty() {
                    continue;
                }
                queries
                    .entry(key_name)
                    .or_default()
                    .push(Vec::new());
            }
        }
    }
    Ok(queries)
}

pub(crate) fn bin2hex(data: &[u8; 20], f: &mut Formatter) -> fmt::Result {
    let mut chars = [0u8; 40];
    binascii::bin2hex(data, &mut chars).expect("failed to hexlify");
    write!(f, "{}", std::str::from_utf8(&chars).unwrap())
}

#[inline]
pub fn hex_to_nibble(byte: u8) -> u8 {
    match byte {
        b'0'..=b'9' => byte - b'0',
        b'a'..=b'f' => byte - b'a' + 10,
        b'A'..=b'F' => byte - b'A' + 10,
        _ => 0xFF,
    }
}

pub fn hex2bin(data: String) -> Result<[u8; 20], CustomError> {
    hex::decode(data)
        .map_err(|data| {
            sentry::capture_error(&data);
            CustomError::new("error converting hex to bin")
        })
        .and_then(|hash_result| {
            hash_result
                .get(..20)
                .and_then(|slice| slice.try_into().ok())
                .ok_or_else(|| CustomError::new("invalid hex length"))
        })
}

pub fn setup_logging(config: &Configuration) {
    let level = match config.log_level.as_str() {
        "off" => log::LevelFilter::Off,
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => {
            panic!("Unknown log level encountered: '{}'", config.log_level.as_str());
        }
    };

    let colors = ColoredLevelConfig::new()
        .trace(Color::Cyan)
        .debug(Color::Magenta)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{} [{:width$}][{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.9f"),
                colors.color(record.level()),
                record.target(),
                message,
                width = 5
            ))
        })
        .level(level)
        .chain(std::io::stdout())
        .apply()
        .unwrap_or_else(|_| panic!("Failed to initialize logging."));
    info!("logging initialized.");
}

#[inline]
pub fn current_time() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .expect("System time before UNIX epoch")
        .as_secs()
}
