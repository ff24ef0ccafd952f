use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use lazyres::{
    Deferred, Error, ImmutableList, MutableList, SequenceCore, SequenceExt, SequenceMut, Slot,
};

fn counted<T: Clone + Send + 'static>(value: T, counter: &Arc<AtomicUsize>) -> Deferred<T> {
    let counter = Arc::clone(counter);
    Deferred::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        value.clone()
    })
}

fn hash_of<H: Hash>(value: &H) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn test_any_stops_before_last_callback() {
    let counters: Vec<_> = (0..3).map(|_| Arc::new(AtomicUsize::new(0))).collect();
    let list = lazyres::immutable(
        ["a", "b", "c"]
            .iter()
            .zip(&counters)
            .map(|(name, counter)| counted(name.to_string(), counter)),
    );
    assert!(list.any(|value| value == "b"));
    assert_eq!(counters[0].load(Ordering::SeqCst), 1);
    assert_eq!(counters[1].load(Ordering::SeqCst), 1);
    assert_eq!(counters[2].load(Ordering::SeqCst), 0);
}

#[test]
fn test_remove_if_keeps_order() {
    let mut list = MutableList::from(vec![1, 2, 3]);
    assert_eq!(list.remove_if(|v| v % 2 == 0), 1);
    assert_eq!(list, [1, 3]);
}

#[test]
fn test_insert_then_view() {
    let mut list = MutableList::from(vec![10, 20, 30]);
    list.insert(1, 99).unwrap();
    assert_eq!(list, [10, 99, 20, 30]);
    assert_eq!(list.sub_list(1, 3).unwrap(), [99, 20]);
}

#[test]
fn test_without_on_pending_singleton_returns_same_list() {
    let counter = Arc::new(AtomicUsize::new(0));
    let list = ImmutableList::from_callback(counted(7, &counter));
    let after = list.without(&8);
    assert!(after.ptr_eq(&list));
    assert_eq!(after, [7]);
}

#[test]
fn test_memoized_value_is_stable() {
    let counter = Arc::new(AtomicUsize::new(0));
    let list = lazyres::immutable((0..3).map(|i| counted(vec![i; 3], &counter)));
    let first: *const Vec<i32> = list.get(1).unwrap();
    for _ in 0..5 {
        let again: *const Vec<i32> = list.get(1).unwrap();
        assert_eq!(first, again);
    }
    assert_eq!(counter.load(Ordering::SeqCst), 1);

    let mut mutable = lazyres::mutable((0..3).map(|i| counted(i, &counter)));
    assert_eq!(mutable.resolve(2), Ok(&2));
    assert_eq!(mutable.get(2), Ok(&2));
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[test]
fn test_equality_ignores_resolution_state() {
    let plain = ImmutableList::from(vec![1, 2, 3]);
    let lazy = lazyres::immutable((1..=3).map(|i| move || i));
    let mixed = MutableList::from_slots(vec![
        Slot::Value(1),
        Slot::deferred(|| 2),
        Slot::Deferred(Deferred::resolved(3)),
    ]);
    assert_eq!(plain, lazy);
    assert_eq!(lazy, mixed);
    assert_eq!(mixed, vec![1, 2, 3]);
    assert_eq!(hash_of(&plain), hash_of(&lazy));
    assert_eq!(hash_of(&lazy), hash_of(&mixed));
    assert_ne!(plain, ImmutableList::from(vec![1, 2]));

    let names = vec!["x".to_string(), "y".to_string()];
    let lazy_names = lazyres::immutable(names.clone().into_iter().map(|name| move || name.clone()));
    assert_eq!(hash_of(&lazy_names), hash_of(&names));
}

#[test]
fn test_derived_lists_stay_lazy() {
    let counter = Arc::new(AtomicUsize::new(0));
    let list = lazyres::immutable((0..4).map(|i| counted(i, &counter)));

    let view = list.sub_list(1, 3).unwrap();
    assert!(view.is_any_unresolved());
    let appended = list.with_appended([10, 11]);
    assert!(appended.is_any_unresolved());
    let joined = view.with_appended_sequence(&list);
    assert!(joined.is_any_unresolved());
    assert_eq!(joined.len(), 6);

    let mut mutable = MutableList::new();
    mutable.append_sequence(&list);
    assert!(mutable.is_any_unresolved());
    assert_eq!(counter.load(Ordering::SeqCst), 0);

    assert_eq!(joined, [1, 2, 0, 1, 2, 3]);
    assert_eq!(counter.load(Ordering::SeqCst), 4);
}

#[test]
fn test_resolved_derivation_degrades() {
    let list = lazyres::immutable((0..3).map(|i| move || i));
    list.iter().for_each(drop);
    let copy = list.with_pushed(3);
    assert!(!copy.is_any_unresolved());
    assert!(copy.is_plain());
    assert!(list.to_immutable().ptr_eq(&list));
}

#[test]
fn test_mutable_resolve_writes_back() {
    let mut list: MutableList<i32> = lazyres::mutable([|| 5]);
    assert!(list.is_unresolved(0).unwrap());
    list.resolve(0).unwrap();
    assert!(!list.is_unresolved(0).unwrap());
    assert!(!list.is_any_unresolved());
}

#[test]
fn test_errors() {
    let mut list = ImmutableList::from(vec![1, 2, 3]);
    assert_eq!(
        list.get(3),
        Err(Error::IndexOutOfBounds { index: 3, size: 3 })
    );
    assert_eq!(
        list.sub_list(2, 1).err(),
        Some(Error::InvalidRange {
            from: 2,
            to: 1,
            size: 3
        })
    );
    assert_eq!(
        SequenceMut::push(&mut list, 4),
        Err(Error::Unsupported { operation: "push" })
    );
    assert_eq!(
        SequenceMut::remove(&mut list, 0).unwrap_err().to_string(),
        "cannot call remove() on an immutable sequence"
    );
    assert_eq!(list, [1, 2, 3]);
}

#[test]
fn test_failed_callback_is_retried() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let list: ImmutableList<u32> = lazyres::immutable([{
        let attempts = Arc::clone(&attempts);
        move || {
            if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                panic!("reference not loaded yet");
            }
            42
        }
    }]);
    let failed = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| *list.get(0).unwrap()));
    assert!(failed.is_err());
    assert!(list.is_unresolved(0).unwrap());
    assert_eq!(list.get(0), Ok(&42));
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[test]
fn test_conversions_between_families() {
    let immutable = lazyres::immutable((0..3).map(|i| move || i * 10));
    let mut mutable = immutable.to_mutable();
    mutable.push(30);
    assert!(mutable.is_unresolved(0).unwrap());
    assert_eq!(mutable, [0, 10, 20, 30]);
    assert_eq!(immutable, [0, 10, 20]);

    let back = mutable.range_to_immutable(1, 4).unwrap();
    assert_eq!(back, [10, 20, 30]);
    assert_eq!(back.to_vec(), vec![10, 20, 30]);
}
