#[cfg(test)]
mod common_tests {
    use percent_encoding::{percent_encode, NON_ALPHANUMERIC};
    use crate::common::common::{current_time, hex2bin, hex_to_nibble, parse_query, percent_decode_bytes};

    #[test]
    fn test_parse_query_single_values() {
        let query = Some(String::from("port=51413&uploaded=0&downloaded=100&left=1000"));
        let parsed = parse_query(query).unwrap();
        assert_eq!(parsed.get("port").unwrap().last().unwrap(), b"51413");
        assert_eq!(parsed.get("uploaded").unwrap().last().unwrap(), b"0");
        assert_eq!(parsed.get("downloaded").unwrap().last().unwrap(), b"100");
        assert_eq!(parsed.get("left").unwrap().last().unwrap(), b"1000");
    }

    #[test]
    fn test_parse_query_last_write_wins() {
        let query = Some(String::from("port=1000&port=2000"));
        let parsed = parse_query(query).unwrap();
        assert_eq!(parsed.get("port").unwrap().last().unwrap(), b"2000");
    }

    #[test]
    fn test_parse_query_multi_value_order_preserved() {
        let query = Some(String::from("info_hash=%AA&info_hash=%BB&info_hash=%CC"));
        let parsed = parse_query(query).unwrap();
        let hashes = parsed.get("info_hash").unwrap();
        assert_eq!(hashes.len(), 3, "All info_hash values should be kept");
        assert_eq!(hashes[0], vec![0xAA]);
        assert_eq!(hashes[1], vec![0xBB]);
        assert_eq!(hashes[2], vec![0xCC]);
    }

    #[test]
    fn test_parse_query_semicolon_separator() {
        let query = Some(String::from("port=51413;compact=1"));
        let parsed = parse_query(query).unwrap();
        assert_eq!(parsed.get("port").unwrap().last().unwrap(), b"51413");
        assert_eq!(parsed.get("compact").unwrap().last().unwrap(), b"1");
    }

    #[test]
    fn test_parse_query_binary_values() {
        let info_hash = [0u8, 1, 2, 255, 254, 37, 38, 59, 61, 100, 10, 13, 0, 9, 200, 201, 202, 203, 204, 205];
        let encoded = percent_encode(&info_hash, NON_ALPHANUMERIC).to_string();
        let parsed = parse_query(Some(format!("info_hash={encoded}"))).unwrap();
        assert_eq!(parsed.get("info_hash").unwrap().last().unwrap(), &info_hash.to_vec());
    }

    #[test]
    fn test_parse_query_rejects_truncated_escape() {
        assert!(parse_query(Some(String::from("info_hash=%A"))).is_err());
        assert!(parse_query(Some(String::from("info_hash=%"))).is_err());
    }

    #[test]
    fn test_parse_query_rejects_invalid_escape() {
        assert!(parse_query(Some(String::from("info_hash=%ZZ"))).is_err());
        assert!(parse_query(Some(String::from("%GG=1"))).is_err());
    }

    #[test]
    fn test_parse_query_key_lowercased() {
        let parsed = parse_query(Some(String::from("Compact=1"))).unwrap();
        assert!(parsed.contains_key("compact"));
    }

    #[test]
    fn test_parse_query_valueless_key() {
        let parsed = parse_query(Some(String::from("no_peer_id&port=1"))).unwrap();
        assert!(parsed.contains_key("no_peer_id"));
        assert_eq!(parsed.get("no_peer_id").unwrap().last().unwrap(), b"");
    }

    #[test]
    fn test_parse_query_none_is_empty() {
        let parsed = parse_query(None).unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_parse_query_round_trip() {
        let pairs = vec![
            ("key_a", b"plain".to_vec()),
            ("key_b", vec![0x00, 0xFF, 0x10]),
            ("key_c", b"with space".to_vec()),
        ];
        let query = pairs
            .iter()
            .map(|(key, value)| format!("{key}={}", percent_encode(value, NON_ALPHANUMERIC)))
            .collect::<Vec<String>>()
            .join("&");
        let parsed = parse_query(Some(query)).unwrap();
        for (key, value) in pairs {
            assert_eq!(parsed.get(key).unwrap().last().unwrap(), &value);
        }
    }

    #[test]
    fn test_percent_decode_passthrough() {
        assert_eq!(percent_decode_bytes("abc123").unwrap(), b"abc123".to_vec());
        assert_eq!(percent_decode_bytes("%41%42").unwrap(), b"AB".to_vec());
    }

    #[test]
    fn test_hex_to_nibble() {
        assert_eq!(hex_to_nibble(b'0'), 0);
        assert_eq!(hex_to_nibble(b'9'), 9);
        assert_eq!(hex_to_nibble(b'a'), 10);
        assert_eq!(hex_to_nibble(b'F'), 15);
        assert_eq!(hex_to_nibble(b'g'), 0xFF);
    }

    #[test]
    fn test_hex2bin() {
        let hash = hex2bin(String::from("aa00000000000000000000000000000000000bff")).unwrap();
        assert_eq!(hash[0], 0xAA);
        assert_eq!(hash[19], 0xFF);
        assert!(hex2bin(String::from("zz")).is_err());
        assert!(hex2bin(String::from("aabb")).is_err());
    }

    #[test]
    fn test_current_time_is_sane() {
        // 2024-01-01 as a lower bound.
        assert!(current_time() > 1_704_067_200);
    }
}
