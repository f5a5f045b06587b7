//! Multi-thread stress scenarios for `ConcurrentList`.
//!
//! Heavier thread counts than the inline unit tests; each case checks a
//! linearizability consequence that holds regardless of interleaving.

use std::sync::Arc;
use std::thread;

use ringlist::ConcurrentList;

const THREADS: usize = 32;
const FILL: u64 = 100;

fn execute_parallel<F>(f: F)
where
    F: Fn() + Send + Sync + 'static,
{
    let f = Arc::new(f);
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let f = Arc::clone(&f);
            thread::spawn(move || f())
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn parallel_push_back() {
    let list: Arc<ConcurrentList<u64>> = Arc::new(ConcurrentList::new());

    {
        let list = Arc::clone(&list);
        execute_parallel(move || {
            for i in 0..FILL {
                list.push_back(i);
            }
        });
    }

    assert_eq!(list.len(), THREADS * FILL as usize);

    let mut counts = vec![0usize; FILL as usize];
    for value in list.to_vec() {
        counts[value as usize] += 1;
    }

    // No lost updates, no duplication: each value pushed once per thread.
    assert!(counts.iter().all(|&c| c == THREADS));
}

#[test]
fn parallel_map() {
    let list: Arc<ConcurrentList<u64>> = Arc::new((0..FILL).collect());

    {
        let list = Arc::clone(&list);
        execute_parallel(move || list.map(|v| v + 1));
    }

    // Each thread's map is atomic against every other thread's, so the
    // increments compose exactly.
    for i in 0..FILL {
        assert_eq!(list.get(i as usize), Some(i + THREADS as u64));
    }
}

#[test]
fn parallel_modify() {
    let list: Arc<ConcurrentList<u64>> = Arc::new((0..FILL).collect());

    {
        let list = Arc::clone(&list);
        execute_parallel(move || {
            for i in 0..FILL as usize {
                list.modify(i, |v| v + 1);
            }
        });
    }

    for i in 0..FILL {
        assert_eq!(list.get(i as usize), Some(i + THREADS as u64));
    }
}

#[test]
fn parallel_mixed_ends() {
    // Half the threads work the front, half the back; counts must balance.
    let list: Arc<ConcurrentList<u64>> = Arc::new(ConcurrentList::new());

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let list = Arc::clone(&list);
            thread::spawn(move || {
                let mut popped = 0u64;
                for i in 0..FILL {
                    if t % 2 == 0 {
                        list.push_front(i);
                        if list.pop_back().is_some() {
                            popped += 1;
                        }
                    } else {
                        list.push_back(i);
                        if list.pop_front().is_some() {
                            popped += 1;
                        }
                    }
                }
                popped
            })
        })
        .collect();

    let popped: u64 = handles.into_iter().map(|h| h.join().unwrap()).sum();

    assert_eq!(list.len() as u64 + popped, THREADS as u64 * FILL);
}

#[test]
fn parallel_insert_at_random_valid_index() {
    let list: Arc<ConcurrentList<u64>> = Arc::new(ConcurrentList::new());

    {
        let list = Arc::clone(&list);
        execute_parallel(move || {
            for i in 0..FILL {
                // len() may be stale by insert time; retry at the front,
                // which is always valid.
                let index = (i as usize * 7) % (list.len() + 1);
                if list.insert(i, index).is_err() {
                    list.insert(i, 0).unwrap();
                }
            }
        });
    }

    assert_eq!(list.len(), THREADS * FILL as usize);
}

#[test]
fn parallel_clear_and_refill() {
    let list: Arc<ConcurrentList<u64>> = Arc::new(ConcurrentList::new());

    {
        let list = Arc::clone(&list);
        execute_parallel(move || {
            for i in 0..FILL {
                list.push_back(i);
            }
            list.clear();
        });
    }

    // The last clear to run may race later pushes from slower threads,
    // but the structure must stay sound and empty-or-consistent.
    let len = list.len();
    assert_eq!(list.to_vec().len(), len);
}
