//! End-to-end reader behavior: bootstrap, navigation, stale responses.

use mushaf::{
    Channel, Event,
    controls::Command,
    pager::{LAST_SURAH, PageLinks},
    surface::Surface,
};
use std::{ops::ControlFlow, time::Duration};

mod common;
use common::{FakeApi, Reader, surah_name};

#[tokio::test]
async fn test_bootstrap_registers_handlers_in_order() {
    let reader = Reader::new(FakeApi::new());
    let events = reader.app.events();

    assert_eq!(events.handler_count(Channel::Start), 2);
    assert_eq!(events.handler_count(Channel::View), 1);
    assert_eq!(events.handler_count(Channel::NextPage), 1);
    assert_eq!(events.handler_count(Channel::PrevPage), 1);
    assert!(!reader.app.controls_armed());
}

#[tokio::test]
async fn test_start_loads_menu_and_first_surah() {
    let reader = Reader::new(FakeApi::new());
    reader.app.start().unwrap();

    // The loader flag is raised synchronously, before any response arrives.
    assert!(reader.view.snapshot().loading);
    assert!(reader.app.controls_armed());

    reader.app.settle().await;
    let view = reader.view.snapshot();
    assert!(!view.loading);
    assert_eq!(view.menu.len(), usize::from(LAST_SURAH));
    assert_eq!(view.menu[0].name, surah_name(1));
    assert_eq!(view.title, surah_name(1));
    assert_eq!(view.verses.len(), 2);
    assert_eq!(view.verses[0].text, "ayah 1:1");
    assert_eq!(view.links, PageLinks { prev: 1, next: 1 });
    assert_eq!(view.active, None);
    assert_eq!(reader.api.requests(), vec![1]);
}

#[tokio::test]
async fn test_view_selects_surah() {
    let reader = Reader::started(FakeApi::new()).await;

    reader.app.events().dispatch(Event::view(36, "Ya-Sin")).unwrap();
    reader.app.settle().await;

    let view = reader.view.snapshot();
    assert_eq!(view.title, surah_name(36));
    assert_eq!(view.active, Some(36));
    assert_eq!(view.links, PageLinks { prev: 35, next: 36 });
    assert_eq!(view.verses[1].reading, "reading 36:2");
}

#[tokio::test]
async fn test_view_rejects_unknown_surah() {
    let reader = Reader::started(FakeApi::new()).await;

    let err = reader
        .app
        .events()
        .dispatch(Event::view(115, ""))
        .unwrap_err();
    assert_eq!(err.channel(), Channel::View);
    assert_eq!(reader.api.requests(), vec![1]);
}

#[tokio::test]
async fn test_next_and_prev_walk_the_book() {
    let reader = Reader::started(FakeApi::new()).await;
    let controls = reader.app.controls();

    for _ in 0..3 {
        assert_eq!(controls.execute(Command::Next), ControlFlow::Continue(()));
        reader.app.settle().await;
    }
    let view = reader.view.snapshot();
    assert_eq!(view.title, surah_name(4));
    assert_eq!(view.active, Some(4));
    assert_eq!(view.links, PageLinks { prev: 3, next: 4 });

    controls.execute(Command::Prev);
    reader.app.settle().await;
    let view = reader.view.snapshot();
    assert_eq!(view.title, surah_name(3));
    assert_eq!(view.active, Some(3));
    assert_eq!(view.links, PageLinks { prev: 2, next: 3 });

    assert_eq!(reader.api.requests(), vec![1, 2, 3, 4, 3]);
}

#[tokio::test]
async fn test_next_stops_at_last_surah() {
    let reader = Reader::started(FakeApi::new()).await;
    let events = reader.app.events();

    events.dispatch(Event::view(LAST_SURAH, "An-Nas")).unwrap();
    events.dispatch(Event::next_page(LAST_SURAH)).unwrap();
    reader.app.settle().await;

    let view = reader.view.snapshot();
    assert_eq!(view.title, surah_name(LAST_SURAH));
    assert_eq!(view.links, PageLinks::at(LAST_SURAH));
    assert_eq!(view.active, Some(LAST_SURAH));
}

#[tokio::test]
async fn test_prev_on_first_surah_keeps_links() {
    let reader = Reader::started(FakeApi::new()).await;
    let events = reader.app.events();

    events.dispatch(Event::view(2, "Al-Baqarah")).unwrap();
    events.dispatch(Event::prev_page(1)).unwrap();
    reader.app.settle().await;

    let view = reader.view.snapshot();
    assert_eq!(view.title, surah_name(1));
    assert_eq!(view.active, Some(1));
    // Links still describe surah 2.
    assert_eq!(view.links, PageLinks { prev: 1, next: 2 });
}

#[tokio::test(start_paused = true)]
async fn test_slow_earlier_response_is_discarded() {
    let api = FakeApi::new().with_delay(2, Duration::from_millis(500));
    let reader = Reader::started(api).await;
    let events = reader.app.events();

    events.dispatch(Event::view(2, "Al-Baqarah")).unwrap();
    events.dispatch(Event::view(3, "Ali 'Imran")).unwrap();
    reader.app.settle().await;

    let view = reader.view.snapshot();
    assert_eq!(view.title, surah_name(3));
    assert_eq!(view.verses[0].text, "ayah 3:1");
    assert!(!view.loading);
    assert_eq!(reader.api.requests(), vec![1, 2, 3]);
}

#[tokio::test(start_paused = true)]
async fn test_fast_earlier_response_is_discarded() {
    let api = FakeApi::new().with_delay(3, Duration::from_millis(500));
    let reader = Reader::started(api).await;
    let events = reader.app.events();

    events.dispatch(Event::view(2, "Al-Baqarah")).unwrap();
    events.dispatch(Event::view(3, "Ali 'Imran")).unwrap();

    // Let surah 2 arrive while surah 3 is still in flight.
    tokio::time::sleep(Duration::from_millis(100)).await;
    let view = reader.view.snapshot();
    assert_eq!(view.title, surah_name(1));
    assert!(view.loading);

    reader.app.settle().await;
    assert_eq!(reader.view.snapshot().title, surah_name(3));
}

#[tokio::test]
async fn test_failed_load_keeps_loader_on() {
    let reader = Reader::started(FakeApi::new().failing_on(7)).await;

    reader.app.events().dispatch(Event::view(7, "Al-A'raf")).unwrap();
    reader.app.settle().await;

    let view = reader.view.snapshot();
    assert!(view.loading);
    assert_eq!(view.title, surah_name(1));
    assert_eq!(view.active, Some(7));
}

#[tokio::test]
async fn test_failed_menu_load() {
    let api = FakeApi {
        fail_list: true,
        ..FakeApi::new()
    };
    let reader = Reader::started(api).await;

    let view = reader.view.snapshot();
    assert!(view.menu.is_empty());
    assert_eq!(view.title, surah_name(1));
}

#[tokio::test]
async fn test_controls_ignored_before_start() {
    let reader = Reader::new(FakeApi::new());
    let controls = reader.app.controls();

    controls.execute(Command::Next);
    controls.execute(Command::View(5));
    controls.execute(Command::Menu);
    reader.app.settle().await;

    assert!(reader.api.requests().is_empty());
    assert!(!reader.view.snapshot().drawer_open);
}

#[tokio::test]
async fn test_menu_toggles_drawer_without_dispatch() {
    let reader = Reader::started(FakeApi::new()).await;
    let controls = reader.app.controls();

    controls.execute(Command::Menu);
    assert!(reader.view.snapshot().drawer_open);
    controls.execute(Command::Menu);
    assert!(!reader.view.snapshot().drawer_open);
    assert_eq!(reader.api.requests(), vec![1]);
}

#[tokio::test]
async fn test_view_command_uses_menu_name() {
    let reader = Reader::started(FakeApi::new()).await;
    let recorder = mushaf::testing::RecordingHandler::new();
    reader
        .app
        .events()
        .listen_handler(Channel::View, recorder.clone());

    reader.app.controls().execute(Command::View(12));
    reader.app.settle().await;

    assert_eq!(recorder.events(), vec![Event::view(12, surah_name(12))]);
    assert_eq!(reader.view.snapshot().title, surah_name(12));
}

#[tokio::test]
async fn test_run_reads_commands_until_quit() {
    let reader = Reader::started(FakeApi::new()).await;
    let input: &[u8] = b"n\n\nbogus\nv 20\nm\nq\nn\n";

    reader.app.controls().run(input).await.unwrap();
    reader.app.settle().await;

    let view = reader.view.snapshot();
    assert_eq!(view.title, surah_name(20));
    assert!(view.drawer_open);
    // The `n` after `q` is never read.
    assert_eq!(reader.api.requests(), vec![1, 2, 20]);
}

#[tokio::test]
async fn test_surface_is_shared_with_app() {
    let reader = Reader::started(FakeApi::new()).await;
    reader.app.surface().set_title("replaced");
    assert_eq!(reader.view.snapshot().title, "replaced");
}
