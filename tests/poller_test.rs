mod common;

use common::{completed_doc, pending_doc, test_config, FakeApi, ListStep};
use document_analysis_client::models::AnalysisResult;
use document_analysis_client::{
    Batch, CompletionPoller, MemoryResultStore, PollState, ResolvedResult, ResultStore,
};
use std::sync::Arc;
use std::time::Duration;

fn sentinel_result() -> ResolvedResult {
    ResolvedResult {
        id: "sentinel".to_string(),
        filename: "sentinel.pdf".to_string(),
        analysis: AnalysisResult {
            detected_items: Vec::new(),
        },
    }
}

#[tokio::test(start_paused = true)]
async fn test_empty_batch_resolves_immediately_without_network() {
    let api = Arc::new(FakeApi::new(vec![]));
    let store = Arc::new(MemoryResultStore::new());
    store.put(vec![sentinel_result()]).unwrap();

    let poller = CompletionPoller::new(&test_config(), api.clone(), store.clone());
    let mut session = poller.start(Batch::from_ids(Vec::new()));

    assert_eq!(session.state(), PollState::Resolved);
    assert_eq!(session.wait().await, PollState::Resolved);
    // 空批次不发起任何网络请求，但仍以空结果集替换旧内容
    assert_eq!(api.list_call_count(), 0);
    assert!(store.get().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_and_barrier_two_tick_scenario() {
    // 第一轮：a 尚未完成、b 还不在列表里；第二轮：两者都完成
    let api = Arc::new(FakeApi::new(vec![
        ListStep::Ok(vec![pending_doc("a", "a.pdf")]),
        ListStep::Ok(vec![
            completed_doc("b", "b.pdf"),
            completed_doc("a", "a.pdf"),
        ]),
    ]));
    let store = Arc::new(MemoryResultStore::new());

    let poller = CompletionPoller::new(&test_config(), api.clone(), store.clone());
    let mut session = poller.start(Batch::from_ids(vec!["a".to_string(), "b".to_string()]));

    assert_eq!(session.wait().await, PollState::Resolved);
    assert!(api.list_call_count() >= 2);

    // 结果按批次顺序排列，与快照顺序无关
    let results = store.get().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].id, "a");
    assert_eq!(results[1].id, "b");
}

#[tokio::test(start_paused = true)]
async fn test_partial_completion_keeps_session_active() {
    let api = Arc::new(FakeApi::new(vec![ListStep::Ok(vec![
        completed_doc("a", "a.pdf"),
        pending_doc("b", "b.pdf"),
    ])]));
    let store = Arc::new(MemoryResultStore::new());

    let poller = CompletionPoller::new(&test_config(), api.clone(), store.clone());
    let session = poller.start(Batch::from_ids(vec!["a".to_string(), "b".to_string()]));

    // 留出若干检查点的时间，部分完成不触发 Resolved
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(session.state(), PollState::Active);
    assert!(store.get().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_cancel_stops_checks_and_leaves_store_untouched() {
    let api = Arc::new(FakeApi::new(vec![ListStep::Ok(vec![pending_doc(
        "a", "a.pdf",
    )])]));
    let store = Arc::new(MemoryResultStore::new());
    store.put(vec![sentinel_result()]).unwrap();

    let poller = CompletionPoller::new(&test_config(), api.clone(), store.clone());
    let mut session = poller.start(Batch::from_ids(vec!["a".to_string()]));

    tokio::time::sleep(Duration::from_millis(1200)).await;
    session.cancel();
    assert_eq!(session.wait().await, PollState::Cancelled);

    // 取消后不再有任何检查
    let calls_after_cancel = api.list_call_count();
    tokio::time::sleep(Duration::from_secs(3)).await;
    assert_eq!(api.list_call_count(), calls_after_cancel);

    // 存储保持 start 之前的内容
    let results = store.get().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "sentinel");

    // 终态会话再次取消是空操作
    session.cancel();
    assert_eq!(session.state(), PollState::Cancelled);
}

#[tokio::test(start_paused = true)]
async fn test_check_failure_is_non_fatal() {
    let api = Arc::new(FakeApi::new(vec![
        ListStep::Fail,
        ListStep::Fail,
        ListStep::Ok(vec![completed_doc("a", "a.pdf")]),
    ]));
    let store = Arc::new(MemoryResultStore::new());

    let poller = CompletionPoller::new(&test_config(), api.clone(), store.clone());
    let mut session = poller.start(Batch::from_ids(vec!["a".to_string()]));

    assert_eq!(session.wait().await, PollState::Resolved);
    assert_eq!(api.list_call_count(), 3);
    assert_eq!(store.get().unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_matched_count_regression_is_treated_as_defect() {
    // 第二轮快照回退（后端契约不允许），会话应忽略该轮并继续
    let api = Arc::new(FakeApi::new(vec![
        ListStep::Ok(vec![
            completed_doc("a", "a.pdf"),
            pending_doc("b", "b.pdf"),
        ]),
        ListStep::Ok(vec![]),
        ListStep::Ok(vec![
            completed_doc("a", "a.pdf"),
            completed_doc("b", "b.pdf"),
        ]),
    ]));
    let store = Arc::new(MemoryResultStore::new());

    let poller = CompletionPoller::new(&test_config(), api.clone(), store.clone());
    let mut session = poller.start(Batch::from_ids(vec!["a".to_string(), "b".to_string()]));

    assert_eq!(session.wait().await, PollState::Resolved);
    assert_eq!(store.get().unwrap().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_poll_timeout() {
    let api = Arc::new(FakeApi::new(vec![ListStep::Ok(vec![pending_doc(
        "a", "a.pdf",
    )])]));
    let store = Arc::new(MemoryResultStore::new());

    let mut config = test_config();
    config.max_poll_duration_secs = Some(2);

    let poller = CompletionPoller::new(&config, api.clone(), store.clone());
    let mut session = poller.start(Batch::from_ids(vec!["a".to_string()]));

    assert_eq!(session.wait().await, PollState::TimedOut);
    // 超时不写存储
    assert!(store.get().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_dropping_session_stops_background_checks() {
    let api = Arc::new(FakeApi::new(vec![ListStep::Ok(vec![pending_doc(
        "a", "a.pdf",
    )])]));
    let store = Arc::new(MemoryResultStore::new());

    let poller = CompletionPoller::new(&test_config(), api.clone(), store.clone());
    let session = poller.start(Batch::from_ids(vec!["a".to_string()]));

    tokio::time::sleep(Duration::from_millis(1200)).await;
    drop(session);
    // 给后台任务一个调度机会来观察取消
    tokio::task::yield_now().await;

    let calls_after_drop = api.list_call_count();
    tokio::time::sleep(Duration::from_secs(3)).await;
    assert_eq!(api.list_call_count(), calls_after_drop);
}
