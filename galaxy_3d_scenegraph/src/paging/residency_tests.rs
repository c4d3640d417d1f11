use std::sync::Arc;
use std::thread;
use crate::node::{Group, NodeRef};
use super::*;

fn root() -> NodeRef {
    Arc::new(Group::new())
}

// ============================================================================
// PagedEntry transitions
// ============================================================================

#[test]
fn test_entry_full_lifecycle() {
    let entry = PagedEntry::new(PagingKey::new("tile"), 0);
    assert_eq!(entry.residency(), Residency::Unloaded);

    assert!(entry.begin_load(1));
    assert_eq!(entry.residency(), Residency::Loading);
    assert!(!entry.begin_load(2));

    assert!(entry.complete_load(root()));
    let status = entry.status();
    assert_eq!(status.residency, Residency::Resident);
    assert!(status.root.is_some());

    assert!(entry.expire_if_unused(100, 60));
    assert_eq!(entry.residency(), Residency::Expired);

    assert!(entry.evict());
    let status = entry.status();
    assert_eq!(status.residency, Residency::Unloaded);
    assert!(status.root.is_none());
}

#[test]
fn test_entry_failure_backoff() {
    let entry = PagedEntry::new(PagingKey::new("tile"), 0);
    assert!(entry.begin_load(5));
    assert!(entry.fail_load(35));

    assert_eq!(entry.residency(), Residency::Unloaded);
    assert!(!entry.begin_load(20));
    assert!(entry.begin_load(35));
}

#[test]
fn test_entry_rejects_out_of_order_transitions() {
    let entry = PagedEntry::new(PagingKey::new("tile"), 0);

    assert!(!entry.complete_load(root()));
    assert!(!entry.fail_load(10));
    assert!(!entry.abandon_load());
    assert!(!entry.expire_if_unused(1000, 1));
    assert!(!entry.evict());
    assert_eq!(entry.residency(), Residency::Unloaded);
}

#[test]
fn test_abandoned_load_drops_late_result() {
    let entry = PagedEntry::new(PagingKey::new("tile"), 0);
    entry.begin_load(0);
    assert!(entry.abandon_load());

    assert!(!entry.complete_load(root()));
    assert_eq!(entry.residency(), Residency::Unloaded);
}

#[test]
fn test_touch_never_moves_backwards() {
    let entry = PagedEntry::new(PagingKey::new("tile"), 3);
    entry.touch(10);
    entry.touch(7);
    assert_eq!(entry.last_used_frame(), 10);
}

#[test]
fn test_touched_entry_does_not_expire() {
    let entry = PagedEntry::new(PagingKey::new("tile"), 0);
    entry.begin_load(0);
    entry.complete_load(root());

    entry.touch(95);
    assert!(!entry.expire_if_unused(100, 60));
    assert_eq!(entry.residency(), Residency::Resident);
}

// ============================================================================
// ResidencyTable
// ============================================================================

#[test]
fn test_table_get_or_insert_is_shared() {
    let table = ResidencyTable::new();
    let key = PagingKey::new("a");

    assert!(table.get(&key).is_none());
    let first = table.get_or_insert(&key, 1);
    let second = table.get_or_insert(&key, 2);

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(second.last_used_frame(), 1);
    assert_eq!(table.len(), 1);
}

#[test]
fn test_table_concurrent_inserts_create_one_entry_per_key() {
    let table = Arc::new(ResidencyTable::new());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let table = table.clone();
            thread::spawn(move || {
                for i in 0..50 {
                    table.get_or_insert(&PagingKey::from(format!("tile_{}", i)), 0);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(table.len(), 50);
    assert_eq!(table.snapshot().len(), 50);
}

#[test]
fn test_table_removes_only_idle_unreferenced_entries() {
    let table = ResidencyTable::new();
    table.get_or_insert(&PagingKey::new("idle"), 0);
    table.get_or_insert(&PagingKey::new("recent"), 18);
    let held = table.get_or_insert(&PagingKey::new("held"), 0);
    let backing_off = table.get_or_insert(&PagingKey::new("backing_off"), 0);
    assert!(backing_off.begin_load(0));
    assert!(backing_off.fail_load(20));
    drop(backing_off);

    assert_eq!(table.remove_reclaimable(10, 5), 1);
    assert!(table.get(&PagingKey::new("idle")).is_none());
    assert_eq!(table.len(), 3);

    drop(held);
    assert_eq!(table.remove_reclaimable(20, 5), 2);
    assert!(table.get(&PagingKey::new("recent")).is_some());
    assert_eq!(table.len(), 1);
}

#[test]
fn test_paging_key_display_and_eq() {
    let key = PagingKey::from("terrain/3_4");
    assert_eq!(key.to_string(), "terrain/3_4");
    assert_eq!(key.as_str(), "terrain/3_4");
    assert_eq!(key, PagingKey::from("terrain/3_4".to_string()));
}
