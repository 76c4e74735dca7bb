use common::{
    init_structured_logging,
    ExecutionContext,
    LoggingConfig,
    OperationTimer,
    PerformanceMetrics,
    RequestContext,
    StructuredLogEntry,
};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

#[test]
fn test_structured_log_entry_creation() {
    let mut fields = HashMap::new();
    fields.insert("review_id".to_string(), Value::String("2024-01-01 10:00:00_0".to_string()));

    let entry = StructuredLogEntry {
        timestamp: chrono::Utc::now().to_rfc3339(),
        level: "INFO".to_string(),
        target: "infrastructure::storage".to_string(),
        message: "Action updated".to_string(),
        fields,
        context: None,
        performance: None,
    };

    assert_eq!(entry.level, "INFO");
    assert_eq!(entry.message, "Action updated");
    assert!(entry.fields.contains_key("review_id"));
}

#[test]
fn test_entry_flattens_fields_and_skips_empty_sections() {
    let mut fields = HashMap::new();
    fields.insert("rating".to_string(), Value::from(2));

    let entry = StructuredLogEntry {
        timestamp: "2024-01-01T00:00:00Z".to_string(),
        level: "WARN".to_string(),
        target: "application::analysis".to_string(),
        message: "Analysis fell back".to_string(),
        fields,
        context: None,
        performance: None,
    };

    let json = serde_json::to_value(&entry).expect("entry serializes");
    assert_eq!(json.get("rating"), Some(&Value::from(2)));
    assert!(json.get("context").is_none());
    assert!(json.get("performance").is_none());
}

#[test]
fn test_entry_with_context_and_metrics() {
    let context = ExecutionContext {
        request_id: Some("req-001".to_string()),
        app_version: "0.1.0".to_string(),
        hostname: "kiosk-1".to_string(),
        pid: 1234,
        thread_id: "thread-1".to_string(),
    };

    let entry = StructuredLogEntry {
        timestamp: chrono::Utc::now().to_rfc3339(),
        level: "INFO".to_string(),
        target: "application::intake".to_string(),
        message: "Operation completed".to_string(),
        fields: HashMap::new(),
        context: Some(context),
        performance: Some(PerformanceMetrics {
            duration_ms: Some(42),
            rows: None,
        }),
    };

    let json = serde_json::to_string(&entry).expect("entry serializes");
    assert!(json.contains("req-001"));
    assert!(json.contains("\"duration_ms\":42"));
}

#[test]
fn test_operation_timer_measures() {
    let timer = OperationTimer::new("load_reviews");
    std::thread::sleep(Duration::from_millis(10));
    assert!(timer.elapsed_ms() >= 10);
    timer.finish();
}

#[test]
fn test_request_contexts_are_unique() {
    let first = RequestContext::new();
    let second = RequestContext::new();
    assert_ne!(first.request_id, second.request_id);
    assert!(!first.request_id.is_empty());
}

#[test]
fn test_init_structured_logging_twice_does_not_panic() {
    let _ = init_structured_logging(LoggingConfig::default());
    let second = init_structured_logging(LoggingConfig::default().with_json_output(true));
    assert!(second.is_err());
}
