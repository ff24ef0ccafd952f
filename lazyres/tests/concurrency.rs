use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use lazyres::{Deferred, ImmutableList, SequenceCore, SequenceExt};

const THREADS: usize = 16;

#[test]
fn test_concurrent_force_runs_callback_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let list: ImmutableList<String> = lazyres::immutable((0..4).map(|i| {
        let calls = Arc::clone(&calls);
        move || {
            calls.fetch_add(1, Ordering::SeqCst);
            // widen the window in which other threads find the cell pending
            thread::sleep(Duration::from_millis(20));
            format!("element {i}")
        }
    }));
    let barrier = Barrier::new(THREADS);

    let seen: Vec<*const String> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                scope.spawn(|| {
                    barrier.wait();
                    let value = list.get(2).unwrap();
                    assert_eq!(value, "element 2");
                    value as *const String as usize
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap() as *const String)
            .collect()
    });

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(seen.windows(2).all(|pair| pair[0] == pair[1]));
    assert!(list.is_unresolved(1).unwrap());
}

#[test]
fn test_concurrent_searches_share_cells() {
    let calls = Arc::new(AtomicUsize::new(0));
    let cells: Vec<Deferred<usize>> = (0..32)
        .map(|i| {
            let calls = Arc::clone(&calls);
            Deferred::new(move || {
                calls.fetch_add(1, Ordering::SeqCst);
                i
            })
        })
        .collect();
    let list = ImmutableList::from_deferred(cells.iter().cloned());
    let copy = list.with_pushed(32);
    let barrier = Barrier::new(THREADS);

    thread::scope(|scope| {
        for t in 0..THREADS {
            let (list, copy, barrier) = (&list, &copy, &barrier);
            scope.spawn(move || {
                barrier.wait();
                if t % 2 == 0 {
                    assert_eq!(list.position(|v| *v == 31), Some(31));
                } else {
                    assert_eq!(copy.iter().sum::<usize>(), (0..=32).sum());
                }
            });
        }
    });

    assert_eq!(calls.load(Ordering::SeqCst), 32);
    assert!(cells.iter().all(Deferred::is_resolved));
    assert!(!copy.is_any_unresolved());
}
