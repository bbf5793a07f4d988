use velox_core::data::DataCall;
use velox_core::navigation::{PageView, ResolveOutcome};
use velox_core::{AppEvent, DataSource, MockDataSource, PageId, Router};

#[test]
fn navigate_to_current_page_is_a_no_op() {
    let mut router = Router::new(PageId::Dashboard);
    let before = router.view().clone();

    assert_eq!(router.navigate_to(PageId::Dashboard), None);
    assert_eq!(router.current_page(), PageId::Dashboard);
    assert_eq!(router.active_menu_item(), PageId::Dashboard);
    assert_eq!(router.view(), &before);
}

#[test]
fn newer_navigation_supersedes_in_flight_one() {
    let source = MockDataSource::new(0);
    let mut router = Router::new(PageId::Dashboard);

    let first = router.navigate_to(PageId::Projects).unwrap();
    let second = router.navigate_to(PageId::Team).unwrap();
    assert_eq!(router.active_menu_item(), PageId::Team);

    assert_eq!(
        router.content_resolved(first, source.fetch_page(PageId::Projects)),
        ResolveOutcome::Stale
    );
    assert_eq!(router.commit(first), None);

    router.content_resolved(second, source.fetch_page(PageId::Team));
    let commit = router.commit(second).unwrap();
    assert_eq!(
        commit.event(),
        Some(AppEvent::PageChanged {
            from: PageId::Dashboard,
            to: PageId::Team,
        })
    );
}

#[test]
fn navigating_to_in_flight_target_keeps_ticket() {
    let mut router = Router::new(PageId::Dashboard);
    let ticket = router.navigate_to(PageId::Files).unwrap();
    assert_eq!(router.navigate_to(PageId::Files), None);
    assert_eq!(router.pending_ticket(), Some(ticket));
}

#[test]
fn navigating_back_to_current_page_commits_without_event() {
    let source = MockDataSource::new(0);
    let mut router = Router::new(PageId::Dashboard);
    router.navigate_to(PageId::Calendar).unwrap();
    let back = router.navigate_to(PageId::Dashboard).unwrap();

    router.content_resolved(back, source.fetch_page(PageId::Dashboard));
    let commit = router.commit(back).unwrap();
    assert_eq!(commit.event(), None);
    assert_eq!(router.current_page(), PageId::Dashboard);
}

#[test]
fn failed_page_offers_retry_for_same_target() {
    let source = MockDataSource::new(0);
    source.fail_page(PageId::Reports, true);
    let mut router = Router::new(PageId::Dashboard);

    let ticket = router.navigate_to(PageId::Reports).unwrap();
    let outcome = router.content_resolved(ticket, source.fetch_page(PageId::Reports));
    match outcome {
        ResolveOutcome::Failed { target, message } => {
            assert_eq!(target, PageId::Reports);
            assert_eq!(message, "Sorry, there was an error loading the reports page.");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(router.current_page(), PageId::Dashboard);

    source.fail_page(PageId::Reports, false);
    let retry = router.navigate_to(PageId::Reports).unwrap();
    router.content_resolved(retry, source.fetch_page(PageId::Reports));
    assert!(router.commit(retry).is_some());
    assert!(matches!(router.view(), PageView::Ready { entering: true, .. }));
    router.finish_enter();
    assert!(matches!(router.view(), PageView::Ready { entering: false, .. }));
}

#[test]
fn mock_reports_disabled_calls() {
    let source = MockDataSource::new(0);
    source.fail_call(DataCall::Notifications, true);
    assert!(source.fetch_notifications().is_err());
    source.fail_call(DataCall::Notifications, false);
    assert_eq!(source.fetch_notifications().unwrap().len(), 8);
}
