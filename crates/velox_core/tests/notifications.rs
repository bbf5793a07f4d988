use rand::rngs::StdRng;
use rand::SeedableRng;
use velox_core::data::mock::sample_notifications;
use velox_core::format::format_relative_time;
use velox_core::notification::SyntheticFeed;
use velox_core::{AppEvent, NotificationDraft, NotificationKind, NotificationStore};

const NOW: i64 = 1_791_979_200_000;

fn seeded() -> NotificationStore {
    let mut store = NotificationStore::new();
    store.seed(sample_notifications(NOW));
    store
}

fn assert_unread_matches(store: &NotificationStore) {
    let counted = store.items().iter().filter(|record| !record.read).count();
    assert_eq!(store.unread_count(), counted);
}

#[test]
fn mark_one_then_all_read_scenario() {
    let mut store = seeded();
    assert_eq!(store.len(), 8);
    assert_eq!(store.unread_count(), 3);

    let unread_id = store.unread()[0].id.clone();
    store.mark_as_read(&unread_id);
    assert_eq!(store.unread_count(), 2);

    let (flipped, event) = store.mark_all_as_read();
    assert_eq!(flipped.len(), 2);
    assert_eq!(event, AppEvent::NotificationsChanged { unread_count: 0 });
    assert_eq!(store.unread_count(), 0);
    assert_eq!(store.badge(), None);
}

#[test]
fn mark_all_as_read_is_idempotent() {
    let mut once = seeded();
    once.mark_all_as_read();

    let mut twice = seeded();
    twice.mark_all_as_read();
    let (flipped, _) = twice.mark_all_as_read();

    assert!(flipped.is_empty());
    assert_eq!(once.items(), twice.items());
    assert_eq!(once.unread_count(), twice.unread_count());
}

#[test]
fn unread_count_tracks_every_add() {
    let mut store = NotificationStore::new();
    let feed = SyntheticFeed::new(1.0);
    let mut rng = StdRng::seed_from_u64(99);

    for step in 0..25 {
        let draft = feed.poll(&mut rng).unwrap();
        let (record, events) = store.add(draft, NOW + step);
        assert_eq!(events[0], AppEvent::NotificationReceived(record.clone()));
        assert_unread_matches(&store);
        if step % 3 == 0 {
            store.mark_as_read(&record.id);
            assert_unread_matches(&store);
        }
    }
    assert_eq!(store.len(), 25);
}

#[test]
fn explicit_id_and_timestamp_are_kept() {
    let mut store = NotificationStore::new();
    let draft = NotificationDraft {
        id: Some("server-42".to_string()),
        created_at: Some(NOW - 60_000),
        ..NotificationDraft::new(NotificationKind::Comment, "New Comment", "Looks good")
    };
    let (record, _) = store.add(draft, NOW);
    assert_eq!(record.id, "server-42");
    assert_eq!(format_relative_time(record.created_at, NOW), "1m ago");
    assert_eq!(store.get("server-42").map(|r| r.read), Some(false));
}

#[test]
fn kinds_route_to_pages() {
    use velox_core::PageId;
    assert_eq!(NotificationKind::Message.target_page(), Some(PageId::Messages));
    assert_eq!(NotificationKind::Meeting.target_page(), Some(PageId::Calendar));
    assert_eq!(NotificationKind::Reminder.target_page(), None);
}
