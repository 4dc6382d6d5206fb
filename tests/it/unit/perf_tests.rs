//! Unit tests for perf module.

use layerboard::perf::{OperationStats, PerfMonitor, ScopedTimer, measure};

#[test]
fn test_perf_monitor_basic() {
    let mut monitor = PerfMonitor::new();

    monitor.begin_dispatch();
    let time = monitor.end_dispatch();

    assert!(time.is_some());
    assert!(time.unwrap() >= 0.0);
    assert_eq!(monitor.total_dispatches(), 1);
}

#[test]
fn test_end_without_begin() {
    let mut monitor = PerfMonitor::new();
    assert_eq!(monitor.end_dispatch(), None);
    assert_eq!(monitor.total_dispatches(), 0);
    assert_eq!(monitor.average_dispatch_time(), 0.0);
    assert_eq!(monitor.slow_dispatch_percentage(), 0.0);
}

#[test]
fn test_average_and_max() {
    let mut monitor = PerfMonitor::new();
    for _ in 0..5 {
        monitor.begin_dispatch();
        monitor.end_dispatch();
    }
    assert_eq!(monitor.total_dispatches(), 5);
    assert!(monitor.average_dispatch_time() >= 0.0);
    assert!(monitor.max_dispatch_time() >= monitor.average_dispatch_time());
}

#[test]
fn test_operation_stats() {
    let mut monitor = PerfMonitor::new();
    monitor.record_operation("moved", 1.0);
    monitor.record_operation("moved", 3.0);

    let stats = monitor.get_operation_stats("moved").unwrap();
    assert_eq!(stats.count(), 2);
    assert_eq!(stats.average(), 2.0);
    assert_eq!(stats.max(), 3.0);
    assert!(monitor.get_operation_stats("rotated").is_none());
}

#[test]
fn test_p95() {
    let mut stats = OperationStats::default();
    for i in 1..=100 {
        stats.record(i as f64);
    }
    assert_eq!(stats.p95(), 96.0);
    assert_eq!(OperationStats::default().p95(), 0.0);
}

#[test]
fn test_stats_window_rolls() {
    let mut stats = OperationStats::default();
    for _ in 0..100 {
        stats.record(10.0);
    }
    for _ in 0..100 {
        stats.record(2.0);
    }
    assert_eq!(stats.count(), 200);
    assert_eq!(stats.average(), 2.0);
    assert_eq!(stats.max(), 10.0);
}

#[test]
fn test_max_survives_window_but_average_does_not() {
    let mut monitor = PerfMonitor::new();
    monitor.record_operation("resized", 50.0);
    for _ in 0..100 {
        monitor.record_operation("resized", 1.0);
    }

    let stats = monitor.get_operation_stats("resized").unwrap();
    assert_eq!(stats.count(), 101);
    assert_eq!(stats.average(), 1.0);
    assert_eq!(stats.p95(), 1.0);
    assert_eq!(stats.max(), 50.0);
}

#[test]
fn test_scoped_timer_creation() {
    let timer = ScopedTimer::new("test_op");
    assert!(timer.elapsed_ms() >= 0.0);
}

#[test]
fn test_measure_returns_result() {
    let (value, ms) = measure(|| 6 * 7);
    assert_eq!(value, 42);
    assert!(ms >= 0.0);
}
