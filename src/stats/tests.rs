#[cfg(test)]
mod stats_tests {
    use serde_json::Value;
    use crate::stats::enums::stats_event::StatsEvent;

    #[test]
    fn test_stats_event_serialization() {
        let serialized = serde_json::to_string(&StatsEvent::Torrents).unwrap();
        assert_eq!(serialized, "\"Torrents\"");
        let parsed: Value = serde_json::from_str(&serialized).unwrap();
        assert_eq!(parsed, Value::String(String::from("Torrents")));
    }
}
