//! List view behavior: ordering of overlapping fetches, filtering and
//! pagination working together

mod common;

use async_trait::async_trait;
use common::twelve_homeworks;
use schoolboard::prelude::*;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::oneshot;

// =============================================================================
// Scripted source
// =============================================================================

/// Each load waits for the result scripted under its `tag` query param
struct ScriptedSource {
    pending: Mutex<HashMap<String, oneshot::Receiver<FetchResult<Value>>>>,
}

impl ScriptedSource {
    fn new() -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
        }
    }

    fn expect(&self, tag: &str) -> oneshot::Sender<FetchResult<Value>> {
        let (tx, rx) = oneshot::channel();
        self.pending.lock().unwrap().insert(tag.to_string(), rx);
        tx
    }
}

fn tag_of(params: &RequestParams) -> String {
    params
        .query
        .iter()
        .find(|(name, _)| name == "tag")
        .map(|(_, value)| value.clone())
        .unwrap_or_default()
}

#[async_trait]
impl ListSource<Value> for ScriptedSource {
    async fn load(&self, params: &RequestParams) -> FetchResult<Value> {
        let rx = self.pending.lock().unwrap().remove(&tag_of(params));
        match rx {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| FetchResult::Failure("dropped".to_string())),
            None => FetchResult::Failure("unscripted".to_string()),
        }
    }
}

fn homework(id: &str) -> Value {
    json!({"_id": id, "class": "5", "section": "A"})
}

// =============================================================================
// Request ordering
// =============================================================================

#[tokio::test]
async fn test_late_result_of_older_fetch_is_discarded() {
    let source = ScriptedSource::new();
    let reply_a = source.expect("a");
    let reply_b = source.expect("b");
    let controller = ListController::new(ListView::new(10), source);

    let params_a = RequestParams::new().query("tag", "a");
    let params_b = RequestParams::new().query("tag", "b");

    let (applied_a, applied_b, ()) = tokio::join!(
        controller.refresh(&params_a),
        controller.refresh(&params_b),
        async {
            // B completes first, A arrives late
            reply_b
                .send(FetchResult::Success(vec![homework("from-b")]))
                .unwrap();
            tokio::task::yield_now().await;
            reply_a
                .send(FetchResult::Success(vec![homework("from-a")]))
                .unwrap();
        }
    );

    assert!(!applied_a);
    assert!(applied_b);

    let view = controller.view();
    assert_eq!(view.status(), &ViewStatus::Success);
    assert_eq!(view.items().len(), 1);
    assert_eq!(view.items()[0]["_id"], "from-b");
}

#[tokio::test]
async fn test_late_failure_does_not_clobber_newer_success() {
    let source = ScriptedSource::new();
    let reply_a = source.expect("a");
    let reply_b = source.expect("b");
    let controller = ListController::new(ListView::new(10), source);

    let params_a = RequestParams::new().query("tag", "a");
    let params_b = RequestParams::new().query("tag", "b");

    let (applied_a, applied_b, ()) = tokio::join!(
        controller.refresh(&params_a),
        controller.refresh(&params_b),
        async {
            reply_b
                .send(FetchResult::Success(vec![homework("hw1")]))
                .unwrap();
            reply_a
                .send(FetchResult::Failure("Not found".to_string()))
                .unwrap();
        }
    );

    assert!(!applied_a);
    assert!(applied_b);
    assert_eq!(controller.view().error(), None);
    assert_eq!(controller.view().items().len(), 1);
}

#[tokio::test]
async fn test_view_stays_readable_while_loading() {
    let source = ScriptedSource::new();
    let reply = source.expect("a");
    let controller = ListController::new(ListView::new(10), source);
    let params = RequestParams::new().query("tag", "a");

    let (applied, ()) = tokio::join!(controller.refresh(&params), async {
        tokio::task::yield_now().await;
        assert!(controller.view().is_loading());
        assert!(!controller.view().can_trigger());
        controller
            .view_mut()
            .set_query(ListQuery::new().with_field("class", "5"));
        reply.send(FetchResult::Success(vec![homework("hw1")])).unwrap();
    });

    assert!(applied);
    assert!(controller.view().can_trigger());
    assert_eq!(controller.view().filtered_count(), 1);
}

// =============================================================================
// Filter then paginate
// =============================================================================

fn loaded_view(page_size: usize) -> ListView<Value> {
    let mut view = ListView::new(page_size);
    let token = view.begin_fetch();
    assert!(view.apply(token, FetchResult::Success(twelve_homeworks())));
    view
}

#[test]
fn test_twelve_records_class_scenario() {
    let mut view = loaded_view(5);
    view.set_query(ListQuery::new().with_field("class", "5"));

    assert_eq!(view.filtered_count(), 6);
    assert_eq!(view.page_state().page(), 1);
    assert_eq!(view.visible().len(), 5);
    assert!(view.meta().has_next);

    assert!(view.next_page());
    assert_eq!(view.visible().len(), 1);
    assert!(!view.meta().has_next);

    // Page 3 does not exist: clamped to the last page
    view.go_to_page(3);
    assert_eq!(view.page_state().page(), 2);
    assert_eq!(view.visible().len(), 1);
    assert!(!view.next_page());

    // Switching to class 6 with a page still valid keeps the page
    view.set_query(ListQuery::new().with_field("class", "6"));
    assert_eq!(view.filtered_count(), 6);
    assert_eq!(view.page_state().page(), 2);
}

#[test]
fn test_eleven_of_twelve_at_default_page_size() {
    let items: Vec<Value> = twelve_homeworks()
        .into_iter()
        .enumerate()
        .map(|(i, mut hw)| {
            hw["class"] = json!(if i == 7 { "6" } else { "5" });
            hw
        })
        .collect();
    let mut view = ListView::new(10);
    let token = view.begin_fetch();
    assert!(view.apply(token, FetchResult::Success(items)));
    view.set_query(ListQuery::new().with_field("class", "5"));

    assert_eq!(view.filtered_count(), 11);
    assert_eq!(view.visible().len(), 10);
    assert!(view.meta().has_next);

    assert!(view.next_page());
    let last: Vec<String> = view.visible().iter().map(|hw| hw["_id"].as_str().unwrap().to_string()).collect();
    assert_eq!(last, vec!["hw11"]);

    view.go_to_page(3);
    assert_eq!(view.page_state().page(), 2);
    let clamped: Vec<&str> = view.visible().iter().map(|hw| hw["_id"].as_str().unwrap()).collect();
    assert_eq!(clamped, last);
    assert!(!view.meta().has_next);
}

#[test]
fn test_visible_never_exceeds_page_size() {
    for page_size in [1, 3, 5, 10, 20] {
        let mut view = loaded_view(page_size);
        for class in ["", "5", "6", "7"] {
            view.set_query(ListQuery::new().with_field("class", class));
            loop {
                let visible = view.visible();
                assert!(visible.len() <= page_size);
                assert!(visible.len() <= view.filtered_count());
                if !view.next_page() {
                    break;
                }
            }
        }
    }
}

#[test]
fn test_filter_is_idempotent_and_order_preserving() {
    let items = twelve_homeworks();
    let query = ListQuery::new()
        .with_field("class", "6")
        .with_search("homework");

    let once: Vec<Value> = apply_filters(&items, &query).into_iter().cloned().collect();
    let twice: Vec<&Value> = apply_filters(&once, &query);

    assert_eq!(twice.len(), once.len());
    assert!(twice.iter().zip(&once).all(|(a, b)| *a == b));

    let ids: Vec<&str> = once.iter().map(|hw| hw["_id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["hw01", "hw03", "hw05", "hw07", "hw09", "hw11"]);
}

#[test]
fn test_unknown_field_matches_nothing() {
    let items = twelve_homeworks();
    let query = ListQuery::new().with_field("teacher", "Smith");
    assert!(apply_filters(&items, &query).is_empty());
}

#[test]
fn test_pager_shown_only_beyond_one_page() {
    let view = loaded_view(12);
    let table = view.render(&TableSpec::new(&["Title"], "No homework", |_, hw: &Value| {
        vec![hw["homeworkTitle"].as_str().unwrap_or_default().to_string()]
    }));
    assert_eq!(table.cell_rows().len(), 12);
    assert!(!table.pager.shown);
    assert_eq!(table.footer, "Showing 12 entries");

    let view = loaded_view(10);
    let table = view.render(&TableSpec::new(&["Title"], "No homework", |_, hw: &Value| {
        vec![hw["homeworkTitle"].as_str().unwrap_or_default().to_string()]
    }));
    assert!(table.pager.shown);
    assert!(!table.pager.prev_enabled);
    assert!(table.pager.next_enabled);
    assert_eq!(table.pager.total_pages, 2);
}
