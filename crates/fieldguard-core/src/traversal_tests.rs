use std::collections::HashMap;

use async_trait::async_trait;

use super::*;
use fieldguard_protocols::{Document, ElementData, RawStyle, Strictness};

enum FrameBehavior {
    Ready(Document, Duration),
    Fail(FrameError),
    Hang,
}

struct MockPage {
    document: Document,
    frames: Vec<FrameRef>,
    behavior: HashMap<String, FrameBehavior>,
}

impl MockPage {
    fn new(document: Document) -> Self {
        Self {
            document,
            frames: Vec::new(),
            behavior: HashMap::new(),
        }
    }

    fn frame(mut self, id: &str, url: &str, behavior: FrameBehavior) -> Self {
        self.frames.push(FrameRef::new(id, url));
        self.behavior.insert(id.to_string(), behavior);
        self
    }
}

#[async_trait]
impl LoadedPage for MockPage {
    fn document(&self) -> &Document {
        &self.document
    }

    async fn frames(&self) -> Result<Vec<FrameRef>, FrameError> {
        Ok(self.frames.clone())
    }

    async fn evaluate_in_frame(&self, frame: &FrameRef) -> Result<Document, FrameError> {
        match self.behavior.get(&frame.id) {
            Some(FrameBehavior::Ready(doc, delay)) => {
                tokio::time::sleep(*delay).await;
                Ok(doc.clone())
            }
            Some(FrameBehavior::Fail(e)) => Err(e.clone()),
            Some(FrameBehavior::Hang) => futures::future::pending().await,
            None => Err(FrameError::Detached(frame.id.clone())),
        }
    }

    async fn close(&self) {}
}

fn doc_with_hidden(url: &str, names: &[&str]) -> Document {
    let mut doc = Document::new(url);
    for name in names {
        doc.push(
            None,
            ElementData::new("input")
                .with_attr("name", *name)
                .with_style(RawStyle {
                    display: Some("none".into()),
                    ..Default::default()
                }),
        );
    }
    doc
}

fn traversal() -> FrameTraversal {
    FrameTraversal::new(EnumerationOptions::new(Strictness::Rendered))
}

fn names(outcome: &TraversalOutcome) -> Vec<String> {
    outcome
        .findings
        .iter()
        .map(|f| f.name.clone().unwrap_or_default())
        .collect()
}

#[tokio::test]
async fn test_main_page_only_when_not_following_frames() {
    let page = MockPage::new(doc_with_hidden("https://a.test", &["main"])).frame(
        "f1",
        "https://b.test",
        FrameBehavior::Ready(doc_with_hidden("https://b.test", &["framed"]), Duration::ZERO),
    );

    let outcome = traversal().traverse(&page, false).await;
    assert_eq!(names(&outcome), ["main"]);
    assert_eq!(outcome.frames_scanned, 0);
    assert_eq!(outcome.frames_failed, 0);
}

#[tokio::test(start_paused = true)]
async fn test_order_is_independent_of_completion_order() {
    let page = MockPage::new(doc_with_hidden("https://a.test", &["main"]))
        .frame(
            "slow",
            "https://slow.test",
            FrameBehavior::Ready(
                doc_with_hidden("https://slow.test", &["slow"]),
                Duration::from_millis(500),
            ),
        )
        .frame(
            "fast",
            "https://fast.test",
            FrameBehavior::Ready(doc_with_hidden("https://fast.test", &["fast"]), Duration::ZERO),
        );

    let outcome = traversal().traverse(&page, true).await;
    assert_eq!(names(&outcome), ["main", "slow", "fast"]);
    assert_eq!(outcome.findings[1].location, "iframe(https://slow.test)");
    assert_eq!(outcome.frames_scanned, 2);
}

#[tokio::test]
async fn test_failing_frame_is_isolated() {
    let page = MockPage::new(doc_with_hidden("https://a.test", &["main"]))
        .frame(
            "denied",
            "https://other-origin.test",
            FrameBehavior::Fail(FrameError::AccessDenied("cross-origin".into())),
        )
        .frame(
            "ok",
            "https://ok.test",
            FrameBehavior::Ready(doc_with_hidden("https://ok.test", &["ok"]), Duration::ZERO),
        );

    let outcome = traversal().traverse(&page, true).await;
    assert_eq!(names(&outcome), ["main", "ok"]);
    assert_eq!(outcome.frames_scanned, 1);
    assert_eq!(outcome.frames_failed, 1);
    assert!(outcome
        .findings
        .iter()
        .all(|f| f.location != "iframe(https://other-origin.test)"));
}

#[tokio::test(start_paused = true)]
async fn test_hanging_frame_times_out_locally() {
    let page = MockPage::new(doc_with_hidden("https://a.test", &["main"]))
        .frame("stuck", "https://stuck.test", FrameBehavior::Hang)
        .frame(
            "ok",
            "https://ok.test",
            FrameBehavior::Ready(doc_with_hidden("https://ok.test", &["ok"]), Duration::ZERO),
        );

    let outcome = traversal()
        .with_frame_timeout(Duration::from_millis(200))
        .traverse(&page, true)
        .await;
    assert_eq!(names(&outcome), ["main", "ok"]);
    assert_eq!(outcome.frames_failed, 1);
}
