//! Wire types for monitor snapshots.
//!
//! These types match the JSON served by MediaWarp at `/api/monitor/data`.
//! Required fields are plain values so a missing one fails decoding; the
//! extra counters the backend sometimes includes are optional.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One fetched status payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorSnapshot {
    /// When the backend collected the data.
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub system_stats: SystemStats,
    pub cache_stats: CacheStats,
    pub hit_rates: HitRates,
    pub warmup_stats: WarmupStats,
    pub deduplication_stats: DeduplicationStats,
}

/// Process-level statistics of the monitored service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStats {
    pub uptime_seconds: u64,
    pub memory_usage_mb: f64,
    pub goroutine_count: u64,
    pub gc_count: u64,
}

/// Playback cache counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub total_requests: u64,
    pub item_info_hits: u64,
    pub strm_type_hits: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_info_misses: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strm_type_misses: Option<u64>,
}

/// Cache hit rates, as percentages in `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitRates {
    pub overall_hit_rate: f64,
}

/// Cache warmer statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarmupStats {
    pub enabled: bool,
    pub success_rate: f64,
    pub total_warmup_requests: u64,
    pub average_warmup_duration_ms: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub successful_warmups: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_warmups: Option<u64>,
}

/// Request deduplicator statistics.
///
/// A disabled deduplicator is reported as just `{"enabled": false}`, so the
/// counters default to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeduplicationStats {
    pub enabled: bool,
    #[serde(default)]
    pub deduplication_rate: f64,
    #[serde(default)]
    pub total_requests: u64,
    #[serde(default)]
    pub deduplicated_count: u64,
    #[serde(default)]
    pub saved_time_ms: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_wait_time_ms: Option<f64>,
}

/// Accepts an RFC 3339 string or a number of epoch milliseconds.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTimestamp {
        Text(String),
        Millis(f64),
    }

    match RawTimestamp::deserialize(deserializer)? {
        RawTimestamp::Text(text) => parse_timestamp(&text).map_err(serde::de::Error::custom),
        RawTimestamp::Millis(millis) => Utc
            .timestamp_millis_opt(millis as i64)
            .single()
            .ok_or_else(|| serde::de::Error::custom(format!("timestamp out of range: {}", millis))),
    }
}

/// Parse a textual timestamp (RFC 3339, or epoch milliseconds as a string).
pub fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, String> {
    let text = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(millis) = text.parse::<i64>() {
        if let Some(parsed) = Utc.timestamp_millis_opt(millis).single() {
            return Ok(parsed);
        }
    }
    Err(format!("unrecognised timestamp: {}", text))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A full payload as produced by the MediaWarp web monitor handler.
    pub(crate) fn sample_json() -> &'static str {
        r#"{
            "timestamp": "2024-05-01T12:30:45.123456789+08:00",
            "cache_stats": {
                "total_requests": 15230,
                "item_info_hits": 9100,
                "item_info_misses": 400,
                "strm_type_hits": 5200,
                "strm_type_misses": 530
            },
            "hit_rates": { "overall_hit_rate": 93.89 },
            "system_stats": {
                "uptime_seconds": 3725,
                "memory_usage_mb": 42.678,
                "goroutine_count": 37,
                "gc_count": 12
            },
            "warmup_stats": {
                "enabled": true,
                "total_warmup_requests": 2500000,
                "successful_warmups": 2400000,
                "failed_warmups": 100000,
                "success_rate": 96,
                "average_warmup_duration_ms": 18
            },
            "deduplication_stats": {
                "enabled": true,
                "total_requests": 999,
                "deduplicated_count": 120,
                "deduplication_rate": 12.012,
                "saved_time_ms": 5400,
                "average_wait_time_ms": 3
            }
        }"#
    }

    pub(crate) fn sample_snapshot() -> MonitorSnapshot {
        serde_json::from_str(sample_json()).unwrap()
    }

    #[test]
    fn test_deserialize_snapshot() {
        let snapshot = sample_snapshot();
        assert_eq!(snapshot.system_stats.uptime_seconds, 3725);
        assert_eq!(snapshot.cache_stats.total_requests, 15230);
        assert_eq!(snapshot.cache_stats.item_info_misses, Some(400));
        assert!((snapshot.hit_rates.overall_hit_rate - 93.89).abs() < f64::EPSILON);
        assert!(snapshot.warmup_stats.enabled);
        assert_eq!(snapshot.warmup_stats.average_warmup_duration_ms, 18.0);
        assert_eq!(snapshot.deduplication_stats.deduplicated_count, 120);
        assert_eq!(
            snapshot.timestamp,
            Utc.with_ymd_and_hms(2024, 5, 1, 4, 30, 45).unwrap()
                + chrono::Duration::nanoseconds(123_456_789)
        );
    }

    #[test]
    fn test_optional_counters_may_be_absent() {
        let json = r#"{
            "timestamp": "2024-05-01T00:00:00Z",
            "system_stats": { "uptime_seconds": 1, "memory_usage_mb": 1.0, "goroutine_count": 1, "gc_count": 0 },
            "cache_stats": { "total_requests": 0, "item_info_hits": 0, "strm_type_hits": 0 },
            "hit_rates": { "overall_hit_rate": 0 },
            "warmup_stats": { "enabled": false, "success_rate": 0, "total_warmup_requests": 0, "average_warmup_duration_ms": 0 },
            "deduplication_stats": { "enabled": false, "deduplication_rate": 0, "total_requests": 0, "deduplicated_count": 0, "saved_time_ms": 0 }
        }"#;

        let snapshot: MonitorSnapshot = serde_json::from_str(json).unwrap();
        assert!(snapshot.cache_stats.item_info_misses.is_none());
        assert!(snapshot.warmup_stats.successful_warmups.is_none());
        assert!(snapshot.deduplication_stats.average_wait_time_ms.is_none());
    }

    #[test]
    fn test_disabled_deduplication_payload() {
        let mut value: serde_json::Value = serde_json::from_str(sample_json()).unwrap();
        value["deduplication_stats"] = serde_json::json!({ "enabled": false });

        let snapshot: MonitorSnapshot = serde_json::from_value(value).unwrap();
        assert!(!snapshot.deduplication_stats.enabled);
        assert_eq!(snapshot.deduplication_stats.total_requests, 0);
        assert_eq!(snapshot.deduplication_stats.deduplicated_count, 0);
    }

    #[test]
    fn test_missing_required_field_fails() {
        let mut value: serde_json::Value = serde_json::from_str(sample_json()).unwrap();
        value["warmup_stats"].as_object_mut().unwrap().remove("success_rate");

        let result = serde_json::from_value::<MonitorSnapshot>(value);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("success_rate"));
    }

    #[test]
    fn test_epoch_millis_timestamp() {
        let mut value: serde_json::Value = serde_json::from_str(sample_json()).unwrap();
        value["timestamp"] = serde_json::json!(1_714_566_645_000_i64);

        let snapshot: MonitorSnapshot = serde_json::from_value(value).unwrap();
        assert_eq!(snapshot.timestamp.timestamp(), 1_714_566_645);
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_err());
        assert!(parse_timestamp("1714566645000").is_ok());
    }
}
