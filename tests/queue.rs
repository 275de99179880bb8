// RcQueue test suite (public surface).
//
// The core invariants exercised:
// - FIFO: dequeue order equals enqueue order, across grows, shrinks, and
//   wraparounds of the circular region.
// - Fullness is decided by count, never by comparing front and back.
// - Sharing: clones alias one buffer.
use rc_collections::RcQueue;

// Test: FIFO law across a grow, a shrink, and a wraparound.
// Verifies: dequeue returns values in exact insertion order throughout.
#[test]
fn fifo_across_resizes_and_wrap() {
    let q = RcQueue::new(4);
    for i in 0..3 {
        q.enqueue(i);
    }
    assert_eq!(q.dequeue(), 0); // front advances: later enqueues wrap
    for i in 3..10 {
        q.enqueue(i); // grows past 4 and then past 8
    }
    assert!(q.capacity() >= 8);
    for i in 1..10 {
        assert_eq!(q.dequeue(), i); // shrinks happen on the way down
    }
    assert!(q.is_empty());
    assert_eq!(q.capacity(), 4, "fully drained: back at the minimum");
}

// Test: the concrete wraparound scenario.
// Verifies: min 4; enqueue 1,2,3,4 (full, no wrap); dequeue -> 1; enqueue 5
// wraps into the vacated slot; draining yields 2,3,4,5; the queue is empty
// and capacity is 4.
#[test]
fn wraparound_scenario() {
    let q = RcQueue::new(4);
    for i in 1..=4 {
        q.enqueue(i);
    }
    assert_eq!(q.dequeue(), 1);
    q.enqueue(5);
    assert_eq!(q.capacity(), 4, "wrap reused the vacated slot, no grow");
    let drained: Vec<i32> = std::iter::from_fn(|| (!q.is_empty()).then(|| q.dequeue())).collect();
    assert_eq!(drained, vec![2, 3, 4, 5]);
    assert!(q.is_empty());
    assert_eq!(q.capacity(), 4);
}

// Test: a full queue whose region wraps is full, not empty.
// Verifies: the next enqueue grows instead of clobbering the front.
#[test]
fn full_wrapped_queue_grows() {
    let q = RcQueue::new(4);
    for i in 0..4 {
        q.enqueue(i);
    }
    q.dequeue();
    q.dequeue();
    q.enqueue(4);
    q.enqueue(5); // full again; live region wraps
    assert_eq!(q.len(), 4);
    q.enqueue(6);
    assert_eq!(q.capacity(), 8);
    assert_eq!(q.len(), 5);
    for i in 2..=6 {
        assert_eq!(q.dequeue(), i);
    }
}

// Test: clones share the circular buffer.
// Verifies: enqueues and dequeues interleaved across handles observe one
// FIFO stream.
#[test]
fn clones_share_buffer() {
    let a = RcQueue::new(2);
    let b = a.clone();
    a.enqueue("x");
    b.enqueue("y");
    assert_eq!(a.len(), 2);
    assert_eq!(a.dequeue(), "x");
    assert_eq!(b.dequeue(), "y");
    assert!(a.shares_storage(&b));
}

// Test: iteration order and the for-each form.
// Verifies: both traversals unwrap the circular region in insertion order.
#[test]
fn iteration_unwraps_in_order() {
    let q = RcQueue::new(4);
    for i in 1..=4 {
        q.enqueue(i);
    }
    q.dequeue();
    q.enqueue(5); // region wraps
    assert_eq!(q.iter().collect::<Vec<_>>(), vec![2, 3, 4, 5]);

    let mut seen = Vec::new();
    q.for_each(|v| seen.push(*v));
    assert_eq!(seen, vec![2, 3, 4, 5]);

    assert_eq!(q.len(), 4, "iteration does not consume");
    assert_eq!(*q.peek(), 2);
}

// Test: contains across the wrap boundary.
#[test]
fn contains_wrapped() {
    let q = RcQueue::new(4);
    for i in 0..4 {
        q.enqueue(i);
    }
    q.dequeue();
    q.enqueue(42);
    assert!(q.contains(&42));
    assert!(q.contains(&3));
    assert!(!q.contains(&0));
}

// Test: precondition violations panic.
#[test]
#[should_panic(expected = "dequeue on an empty queue")]
fn dequeue_empty_panics() {
    let q: RcQueue<u8> = RcQueue::new(1);
    q.dequeue();
}

#[test]
#[should_panic(expected = "peek on an empty queue")]
fn peek_empty_panics() {
    let q: RcQueue<u8> = RcQueue::new(1);
    let _ = q.peek();
}
