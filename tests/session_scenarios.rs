//! Search session scenarios driven through the public API, the way the
//! terminal runtime drives them: events in, actions out, worker responses
//! fed back.

use imgfinder::app::{handle_event, Action, AppState, Event, FetchPhase};
use imgfinder::worker::{WorkerMessage, WorkerResponse};
use imgfinder::{ImageResult, PageRequest, SearchPage, Theme};

fn image(id: u64) -> ImageResult {
    ImageResult {
        id,
        thumbnail_url: format!("https://cdn.example/{id}_640.jpg"),
        full_url: format!("https://cdn.example/{id}_1280.jpg"),
        tags: vec!["cat".to_string(), "pet".to_string()],
    }
}

/// Builds the page the API would return for `request`, with `count` items
/// numbered from the page's first position.
fn serve(request: &PageRequest, total_hits: u64, count: u64) -> SearchPage {
    let start = u64::from(request.page - 1) * u64::from(request.per_page);
    SearchPage {
        total_hits,
        items: (start..start + count).map(image).collect(),
    }
}

fn single_fetch(actions: Vec<Action>) -> (u64, PageRequest) {
    match actions.as_slice() {
        [Action::PostToWorker(WorkerMessage::FetchPage { ticket })] => {
            (ticket.generation, ticket.request.clone())
        }
        other => panic!("expected one fetch, got {other:?}"),
    }
}

fn search(state: &mut AppState, query: &str) -> Vec<Action> {
    state.input = query.to_string();
    handle_event(state, &Event::Submit).unwrap().1
}

fn complete(state: &mut AppState, actions: Vec<Action>, total_hits: u64, count: u64) {
    let (generation, request) = single_fetch(actions);
    let response = WorkerResponse::PageLoaded {
        generation,
        page: serve(&request, total_hits, count),
    };
    handle_event(state, &Event::Worker(response)).unwrap();
}

#[test]
fn cats_scenario_paginates_to_the_end() {
    let mut state = AppState::new(10, Theme::default());

    let actions = search(&mut state, "cats");
    let (_, request) = single_fetch(actions.clone());
    assert_eq!(request.query, "cats");
    assert_eq!(request.page, 1);
    assert_eq!(request.per_page, 10);

    complete(&mut state, actions, 24, 10);
    assert_eq!(state.session.results().len(), 10);
    assert_eq!(state.session.pagination().total_pages, 3);
    assert!(state.session.has_more());

    let actions = handle_event(&mut state, &Event::LoadMore).unwrap().1;
    complete(&mut state, actions, 24, 10);
    assert_eq!(state.session.results().len(), 20);
    assert_eq!(state.session.pagination().current_page, 2);
    assert!(state.session.has_more());

    let actions = handle_event(&mut state, &Event::LoadMore).unwrap().1;
    complete(&mut state, actions, 24, 2);
    assert_eq!(state.session.results().len(), 22);
    assert_eq!(state.session.pagination().current_page, 3);
    assert!(!state.session.has_more());

    let (render, actions) = handle_event(&mut state, &Event::LoadMore).unwrap();
    assert!(!render);
    assert!(actions.is_empty());

    let ids: Vec<u64> = state.session.results().iter().map(|i| i.id).collect();
    assert_eq!(ids, (0..22).collect::<Vec<_>>());
}

#[test]
fn empty_query_clears_previous_results() {
    let mut state = AppState::new(10, Theme::default());
    let actions = search(&mut state, "cats");
    complete(&mut state, actions, 5, 5);
    assert_eq!(state.session.results().len(), 5);

    let actions = search(&mut state, "");
    assert!(actions.is_empty());
    assert!(state.session.results().is_empty());
    assert!(!state.session.search().is_loading);
    assert_eq!(state.session.phase(), FetchPhase::Idle);
}

#[test]
fn resubmitting_discards_the_superseded_response() {
    let mut state = AppState::new(10, Theme::default());
    let cats = search(&mut state, "cats");
    let dogs = search(&mut state, "dogs");

    complete(&mut state, dogs, 3, 3);
    complete(&mut state, cats, 24, 10);

    assert_eq!(state.session.query(), "dogs");
    assert_eq!(state.session.results().len(), 3);
    assert_eq!(state.session.pagination().total_pages, 1);
}

#[test]
fn failed_load_more_can_be_retried() {
    let mut state = AppState::new(10, Theme::default());
    let actions = search(&mut state, "cats");
    complete(&mut state, actions, 24, 10);

    let actions = handle_event(&mut state, &Event::LoadMore).unwrap().1;
    let (generation, request) = single_fetch(actions);
    assert_eq!(request.page, 2);
    let failure = WorkerResponse::FetchFailed {
        generation,
        message: "Network error: connection reset".to_string(),
    };
    handle_event(&mut state, &Event::Worker(failure)).unwrap();

    assert_eq!(state.session.results().len(), 10);
    assert!(state.session.search().error.is_some());

    let actions = handle_event(&mut state, &Event::LoadMore).unwrap().1;
    let (_, retry) = single_fetch(actions.clone());
    assert_eq!(retry.page, 2);
    complete(&mut state, actions, 24, 10);
    assert_eq!(state.session.results().len(), 20);
    assert!(state.session.search().error.is_none());
}

#[test]
fn preview_opens_on_selected_image_and_closes() {
    let mut state = AppState::new(10, Theme::default());
    let actions = search(&mut state, "cats");
    complete(&mut state, actions, 24, 10);

    handle_event(&mut state, &Event::KeyDown).unwrap();
    handle_event(&mut state, &Event::KeyDown).unwrap();
    handle_event(&mut state, &Event::OpenSelected).unwrap();

    let preview = state.session.preview();
    assert!(preview.is_open);
    assert_eq!(preview.selected.as_ref().map(|i| i.id), Some(2));

    handle_event(&mut state, &Event::ClosePreview).unwrap();
    assert!(!state.session.preview().is_open);
    assert!(state.session.preview().selected.is_none());
}
