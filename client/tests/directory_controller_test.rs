use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    rc::Rc,
    time::Duration,
};

use client::{
    ApiError, ClientConfig, CommitOutcome, DirectoryController, DirectoryLocation, LocationWriter, PageRequest,
    QueryStatus, ResourceApi, VoteReceipt,
    debounce::Timer,
    optimistic::{MutationPhase, SettleOutcome},
};
use common::{
    facet_catalog::{FacetKey, ResourceType},
    filter_state::{FilterState, SortKey},
    resource::{ResourceSummary, ResultPage},
    vote::{VoteState, VoteValue},
};
use futures_util::future::join;


type Reply = (u64, Result<ResultPage, ApiError>);

struct MockInner {
    respond: Box<dyn Fn(&PageRequest) -> Reply>,
    requests: RefCell<Vec<PageRequest>>,
    vote_replies: RefCell<VecDeque<(u64, Result<VoteReceipt, ApiError>)>>,
    vote_calls: RefCell<Vec<(String, Option<VoteValue>)>>,
}

#[derive(Clone)]
struct MockApi(Rc<MockInner>);

impl MockApi {
    fn new(respond: impl Fn(&PageRequest) -> Reply + 'static) -> Self {
        Self(Rc::new(MockInner {
            respond: Box::new(respond),
            requests: RefCell::new(Vec::new()),
            vote_replies: RefCell::new(VecDeque::new()),
            vote_calls: RefCell::new(Vec::new()),
        }))
    }

    fn requests(&self) -> Vec<PageRequest> {
        self.0.requests.borrow().clone()
    }

    fn queue_vote_reply(&self, delay_ms: u64, reply: Result<VoteReceipt, ApiError>) {
        self.0.vote_replies.borrow_mut().push_back((delay_ms, reply));
    }

    fn vote_calls(&self) -> Vec<(String, Option<VoteValue>)> {
        self.0.vote_calls.borrow().clone()
    }

    async fn vote_reply(&self, post_id: &str, value: Option<VoteValue>) -> Result<VoteReceipt, ApiError> {
        self.0.vote_calls.borrow_mut().push((post_id.to_string(), value));
        let next = self.0.vote_replies.borrow_mut().pop_front();
        let (delay, reply) = next.unwrap_or((10, Ok(VoteReceipt::default())));
        tokio::time::sleep(Duration::from_millis(delay)).await;
        reply
    }
}

impl ResourceApi for MockApi {
    async fn fetch_page(&self, request: &PageRequest) -> Result<ResultPage, ApiError> {
        self.0.requests.borrow_mut().push(request.clone());
        let (delay, reply) = (self.0.respond)(request);
        tokio::time::sleep(Duration::from_millis(delay)).await;
        reply
    }

    async fn cast_vote(&self, post_id: &str, value: VoteValue) -> Result<VoteReceipt, ApiError> {
        self.vote_reply(post_id, Some(value)).await
    }

    async fn clear_vote(&self, post_id: &str) -> Result<VoteReceipt, ApiError> {
        self.vote_reply(post_id, None).await
    }
}

struct TokioTimer;

impl Timer for TokioTimer {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Write {
    Replace(DirectoryLocation),
    Push(DirectoryLocation),
}

#[derive(Clone, Default)]
struct RecordingLocation(Rc<RefCell<Vec<Write>>>);

impl RecordingLocation {
    fn writes(&self) -> Vec<Write> {
        self.0.borrow().clone()
    }
}

impl LocationWriter for RecordingLocation {
    fn replace(&self, location: &DirectoryLocation) {
        self.0.borrow_mut().push(Write::Replace(location.clone()));
    }

    fn push(&self, location: &DirectoryLocation) {
        self.0.borrow_mut().push(Write::Push(location.clone()));
    }
}

type Controller = DirectoryController<MockApi, TokioTimer, RecordingLocation>;

fn controller(api: &MockApi, initial: DirectoryLocation) -> (Controller, RecordingLocation) {
    let location = RecordingLocation::default();
    let config = ClientConfig { page_size: 2, ..ClientConfig::default() };
    (DirectoryController::new(api.clone(), TokioTimer, location.clone(), config, initial), location)
}

fn page(ids: &[&str], next_cursor: Option<&str>) -> ResultPage {
    let items = ids.iter().map(|id| ResourceSummary::new(*id, format!("Entry {id}"))).collect();
    ResultPage::new(items, next_cursor)
}

fn ids(controller: &Controller) -> Vec<String> {
    controller.items().into_iter().map(|item| item.id).collect()
}

async fn after(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}


#[tokio::test(start_paused = true)]
async fn response_for_previous_filter_never_reaches_new_results() {
    let api = MockApi::new(|request| {
        if request.filter.is_selected(FacetKey::State, "CA") {
            (50, Ok(page(&["ca-1"], None)))
        } else {
            (300, Ok(page(&["any-1", "any-2"], None)))
        }
    });
    let initial = DirectoryLocation::new(ResourceType::Universities, FilterState::new().with_query("soil"));
    let (controller, _) = controller(&api, initial.clone());

    let (slow, fast) = join(controller.restore(initial), async {
        after(10).await;
        controller.set_facet(FacetKey::State, vec!["CA".to_string()]).await
    })
    .await;

    assert_eq!(fast, Some(CommitOutcome::Applied { added: 1 }));
    assert_eq!(slow, Some(CommitOutcome::Stale));
    assert_eq!(ids(&controller), vec!["ca-1"]);
    assert_eq!(controller.status(), QueryStatus::Ready);
}

#[tokio::test(start_paused = true)]
async fn two_rapid_load_more_calls_issue_one_request() {
    let api = MockApi::new(|request| match request.cursor.as_deref() {
        None => (10, Ok(page(&["r1", "r2"], Some("c2")))),
        Some(_) => (100, Ok(page(&["r2", "r3"], None))),
    });
    let (controller, _) = controller(&api, DirectoryLocation::default());
    controller.refresh().await;

    let (first, second) = join(controller.load_more(), controller.load_more()).await;
    assert_eq!(first, Some(CommitOutcome::Applied { added: 1 }));
    assert_eq!(second, None);

    let next_page_requests = api.requests().iter().filter(|request| !request.is_first_page()).count();
    assert_eq!(next_page_requests, 1);
    assert_eq!(ids(&controller), vec!["r1", "r2", "r3"]);
    assert!(!controller.has_more());
    assert_eq!(controller.load_more().await, None);
}

#[tokio::test(start_paused = true)]
async fn typing_burst_fetches_once_and_writes_location_once() {
    let api = MockApi::new(|_| (10, Ok(page(&["r1"], None))));
    let (controller, location) = controller(&api, DirectoryLocation::default());
    controller.restore(DirectoryLocation::default()).await;

    let typing = async {
        let ((t, to), tomato) = join(
            join(controller.set_query("t"), async {
                after(100).await;
                controller.set_query("to").await
            }),
            async {
                after(200).await;
                controller.set_query("tomato").await
            },
        )
        .await;
        (t, to, tomato)
    };
    let (t, to, tomato) = typing.await;
    assert_eq!((t, to), (None, None));
    assert!(matches!(tomato, Some(CommitOutcome::Applied { .. })));

    let queries: Vec<String> = api.requests().iter().map(|request| request.filter.query.clone()).collect();
    assert_eq!(queries, vec!["", "tomato"]);
    let expected = DirectoryLocation::new(ResourceType::Resources, FilterState::new().with_query("tomato"));
    assert_eq!(location.writes(), vec![Write::Replace(expected)]);
}

#[tokio::test(start_paused = true)]
async fn facet_and_sort_fetch_at_once_and_replace_location_after_settling() {
    let api = MockApi::new(|_| (10, Ok(page(&["r1"], None))));
    let (controller, location) = controller(&api, DirectoryLocation::default());
    controller.restore(DirectoryLocation::default()).await;

    let ((facet, sort), ()) = join(
        join(controller.set_facet(FacetKey::Topic, vec!["labor".to_string()]), async {
            after(50).await;
            controller.set_sort(SortKey::Newest).await
        }),
        async {
            after(20).await;
            assert_eq!(api.requests().len(), 2, "facet fetch starts without waiting");
            assert!(location.writes().is_empty());
        },
    )
    .await;

    assert_eq!(facet, Some(CommitOutcome::Applied { added: 1 }));
    assert!(sort.is_some());
    assert_eq!(api.requests().len(), 3);
    let expected = DirectoryLocation::new(
        ResourceType::Resources,
        FilterState::new().with_facet(FacetKey::Topic, ["labor"]).with_sort(SortKey::Newest),
    );
    assert_eq!(location.writes(), vec![Write::Replace(expected)]);
}

#[tokio::test(start_paused = true)]
async fn invalid_facet_value_changes_nothing() {
    let api = MockApi::new(|_| (10, Ok(page(&["u1"], None))));
    let initial = DirectoryLocation::new(ResourceType::Universities, FilterState::new());
    let (controller, location) = controller(&api, initial.clone());
    controller.restore(initial).await;
    let before = controller.filter();

    assert_eq!(controller.set_facet(FacetKey::State, vec!["ZZ".to_string()]).await, None);
    assert!(Rc::ptr_eq(&before, &controller.filter()));
    assert_eq!(api.requests().len(), 1);
    assert!(location.writes().is_empty());
}

#[tokio::test(start_paused = true)]
async fn failed_page_keeps_results_and_retry_recovers() {
    let outage = Rc::new(Cell::new(true));
    let api = MockApi::new({
        let outage = outage.clone();
        move |request| match request.cursor.as_deref() {
            None => (10, Ok(page(&["g1", "g2"], Some("c2")))),
            Some(_) if outage.get() => (10, Err(ApiError::Status { status: 503, body: "maintenance".into() })),
            Some(_) => (10, Ok(page(&["g3"], None))),
        }
    });
    let initial = DirectoryLocation::new(ResourceType::Grants, FilterState::new());
    let (controller, _) = controller(&api, initial);
    controller.refresh().await;

    assert_eq!(controller.load_more().await, Some(CommitOutcome::Failed));
    assert_eq!(ids(&controller), vec!["g1", "g2"]);
    assert!(matches!(controller.status(), QueryStatus::Failed(ApiError::Status { status: 503, .. })));

    outage.set(false);
    assert_eq!(controller.retry().await, Some(CommitOutcome::Applied { added: 1 }));
    assert_eq!(ids(&controller), vec!["g1", "g2", "g3"]);
    assert_eq!(controller.status(), QueryStatus::Ready);
    assert_eq!(api.requests().last().and_then(|request| request.cursor.clone()).as_deref(), Some("c2"));
}

fn forum_api() -> MockApi {
    MockApi::new(|_| {
        let mut post = ResourceSummary::new("p1", "Drip line clogging");
        post.votes = Some(VoteState::new(5, None));
        (10, Ok(ResultPage::new(vec![post], None)))
    })
}

async fn forum_controller(api: &MockApi) -> Controller {
    let initial = DirectoryLocation::new(ResourceType::Forum, FilterState::new());
    let (controller, _) = controller(api, initial);
    controller.refresh().await;
    controller
}

#[tokio::test(start_paused = true)]
async fn voting_up_twice_returns_to_the_start() {
    let api = forum_api();
    let controller = forum_controller(&api).await;

    let first = controller.vote("p1", VoteValue::Up).await;
    assert_eq!(first, Some(SettleOutcome::Committed(VoteState::new(6, Some(VoteValue::Up)))));
    controller.vote("p1", VoteValue::Up).await;

    assert_eq!(controller.vote_state("p1"), Some(VoteState::new(5, None)));
    assert_eq!(controller.items()[0].votes, Some(VoteState::new(5, None)));
    assert_eq!(
        api.vote_calls(),
        vec![("p1".to_string(), Some(VoteValue::Up)), ("p1".to_string(), None)]
    );
}

#[tokio::test(start_paused = true)]
async fn failed_vote_rolls_back_and_queues_a_notice() {
    let api = forum_api();
    let controller = forum_controller(&api).await;
    api.queue_vote_reply(50, Err(ApiError::Status { status: 401, body: "sign in".into() }));

    let ((), outcome) = join(
        async {
            after(10).await;
            assert_eq!(controller.vote_state("p1"), Some(VoteState::new(6, Some(VoteValue::Up))));
            assert_eq!(controller.vote_phase("p1"), MutationPhase::Pending);
        },
        controller.vote("p1", VoteValue::Up),
    )
    .await;

    assert!(matches!(outcome, Some(SettleOutcome::RolledBack { .. })));
    assert_eq!(controller.vote_state("p1"), Some(VoteState::new(5, None)));
    let notices = controller.take_notices();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].detail.contains("401"));
    assert!(controller.take_notices().is_empty());
}

#[tokio::test(start_paused = true)]
async fn late_answer_to_an_earlier_click_is_ignored() {
    let api = forum_api();
    let controller = forum_controller(&api).await;
    api.queue_vote_reply(200, Err(ApiError::Network("timeout".into())));
    api.queue_vote_reply(10, Ok(VoteReceipt { score: Some(4) }));

    let (first, second) = join(controller.vote("p1", VoteValue::Up), async {
        after(20).await;
        controller.vote("p1", VoteValue::Down).await
    })
    .await;

    assert_eq!(first, Some(SettleOutcome::Superseded));
    assert_eq!(second, Some(SettleOutcome::Committed(VoteState::new(4, Some(VoteValue::Down)))));
    assert_eq!(controller.vote_state("p1"), Some(VoteState::new(4, Some(VoteValue::Down))));
    assert!(controller.take_notices().is_empty());
}

#[tokio::test(start_paused = true)]
async fn switching_section_pushes_a_history_entry() {
    let api = MockApi::new(|_| (10, Ok(page(&["x1"], None))));
    let initial = DirectoryLocation::new(
        ResourceType::Resources,
        FilterState::new().with_query("greenhouse").with_facet(FacetKey::Format, ["video"]),
    );
    let (controller, location) = controller(&api, initial.clone());
    controller.restore(initial).await;

    controller.switch_section(ResourceType::Universities).await;
    let expected = DirectoryLocation::new(ResourceType::Universities, FilterState::new().with_query("greenhouse"));
    assert_eq!(location.writes(), vec![Write::Push(expected)]);
    let last = api.requests().pop().unwrap();
    assert_eq!(last.resource_type, ResourceType::Universities);
    assert!(last.filter.selected(FacetKey::Format).is_none());
    assert_eq!(controller.switch_section(ResourceType::Universities).await, None);
}

#[tokio::test(start_paused = true)]
async fn router_echo_is_ignored_and_back_navigation_refetches() {
    let api = MockApi::new(|_| (10, Ok(page(&["r1"], None))));
    let (controller, location) = controller(&api, DirectoryLocation::default());
    let renders = Rc::new(Cell::new(0));
    controller.subscribe({
        let renders = renders.clone();
        move || renders.set(renders.get() + 1)
    });
    controller.restore(DirectoryLocation::default()).await;
    controller.set_sort(SortKey::Title).await;
    assert_eq!(api.requests().len(), 2);

    let Some(Write::Replace(written)) = location.writes().pop() else {
        panic!("expected a replace, got {:?}", location.writes());
    };
    assert_eq!(controller.restore(written).await, None);
    assert_eq!(api.requests().len(), 2);

    let back = controller.restore(DirectoryLocation::default()).await;
    assert!(matches!(back, Some(CommitOutcome::Applied { .. })));
    assert_eq!(controller.filter().sort, SortKey::Relevance);
    assert_eq!(api.requests().len(), 3);
    assert_eq!(location.writes().len(), 1, "restoring never writes the location");
    assert!(renders.get() > 0);
}

fn post(id: &str, score: i64) -> ResourceSummary {
    let mut post = ResourceSummary::new(id, format!("Post {id}"));
    post.votes = Some(VoteState::new(score, None));
    post
}

#[tokio::test(start_paused = true)]
async fn settled_vote_survives_the_next_page() {
    let api = MockApi::new(|request| match request.cursor.as_deref() {
        None => (10, Ok(ResultPage::new(vec![post("p1", 5), post("p2", 1)], Some("c2")))),
        Some(_) => (10, Ok(ResultPage::new(vec![post("p2", 1), post("p3", 0)], None))),
    });
    let controller = forum_controller(&api).await;
    api.queue_vote_reply(10, Ok(VoteReceipt { score: Some(7) }));

    controller.vote("p1", VoteValue::Up).await;
    assert_eq!(controller.vote_state("p1"), Some(VoteState::new(7, Some(VoteValue::Up))));

    assert_eq!(controller.load_more().await, Some(CommitOutcome::Applied { added: 1 }));
    assert_eq!(controller.vote_state("p1"), Some(VoteState::new(7, Some(VoteValue::Up))));
    assert_eq!(controller.vote_state("p3"), Some(VoteState::new(0, None)));
    let scores: Vec<i64> = controller.items().iter().filter_map(|item| item.votes).map(|votes| votes.score).collect();
    assert_eq!(scores, vec![7, 1, 0]);

    // a reloaded first page is the server's current word
    controller.refresh().await;
    assert_eq!(controller.vote_state("p1"), Some(VoteState::new(5, None)));
}

#[tokio::test(start_paused = true)]
async fn entity_from_the_previous_section_cannot_be_voted_on() {
    let api = MockApi::new(|request| match request.resource_type {
        ResourceType::Forum => (10, Ok(ResultPage::new(vec![post("p1", 5)], None))),
        _ => (10, Ok(page(&["r1"], None))),
    });
    let controller = forum_controller(&api).await;
    assert!(controller.vote_state("p1").is_some());

    controller.switch_section(ResourceType::Resources).await;
    assert_eq!(ids(&controller), vec!["r1"]);
    assert_eq!(controller.vote("p1", VoteValue::Up).await, None);
    assert_eq!(controller.vote_state("p1"), None);
    assert!(api.vote_calls().is_empty());
}
