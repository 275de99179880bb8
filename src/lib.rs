//! rc-collections: single-threaded containers — stack, queue, binary
//! heap, doubly linked list, chained hash map — whose handles share one
//! backing store through a reference count.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: build five containers over two storage disciplines in safe,
//!   verifiable layers so each piece can be reasoned about independently.
//! - Layers:
//!   - buffer::SlotBuf<T>: the growable slot buffer shared by the stack,
//!     queue, and heap cores. Doubles when full, halves at ≤50% occupancy,
//!     never below the constructed minimum; vacated slots are cleared
//!     immediately. The grow/shrink hysteresis lives here exactly once.
//!   - Structural cores (StackCore, QueueCore, HeapCore, ListCore,
//!     MapCore): plain `&mut self` containers holding the per-container
//!     algorithms — heap sift, circular index arithmetic, proximity-
//!     directed node traversal, chained-bucket resize.
//!   - Sharing wrappers (RcStack, RcQueue, RcHeap, RcList, RcHashMap):
//!     thin value-type handles over `Rc<RefCell<Core>>`. `Clone` shares
//!     the backing storage; mutation through any handle is visible through
//!     every aliasing handle; the storage is released exactly when the
//!     last handle is dropped.
//!
//! Constraints
//! - Single-threaded: every handle is `!Send`/`!Sync` by design (no
//!   atomics); the compiler enforces the constraint.
//! - Two storage shapes only: one contiguous slot buffer (stack, queue,
//!   heap) and one generational node arena (list, and the map's bucket
//!   chains). The map's buckets *are* lists.
//! - Deterministic capacity: growth doubles, shrink halves, the floor is
//!   the constructed minimum. Capacity is always `min * 2^k`.
//! - Fail fast: empty-container reads, out-of-range indices, and missing
//!   keys panic. No sentinel exists for a generic element type, so none is
//!   returned.
//!
//! Why this split?
//! - Localize invariants: each core has a small, precise contract and is
//!   testable without the sharing layer.
//! - Minimize unsafe: there is none. Structural indexing is safe Rust;
//!   aliasing handles go through the `RefCell` borrow flag, which turns
//!   reentrant mutation (from user code run during probing, predicates,
//!   or callbacks) into an immediate panic instead of corruption.
//!
//! Iteration
//! - Every container offers a restartable external iterator and an
//!   internal for-each form; the list additionally iterates backward.
//! - Iteration is a live view, not a snapshot. Mutating a container while
//!   an iteration is paused over it is unspecified (never memory-unsafe:
//!   array-backed iterators clamp to the live region, arena cursors go
//!   stale harmlessly via generational keys).
//! - The heap is the exception: iterating it by value requires a sort
//!   pass, so it yields a sorted snapshot, recomputed lazily only after a
//!   mutation.
//!
//! Hasher and rehashing invariants
//! - Each map payload stores a precomputed `u64` hash and indexing always
//!   uses the stored hash; `K: Hash` is never invoked after insertion, so
//!   a resize cannot call back into user code.
//!
//! Notes and non-goals
//! - No thread-safety anywhere; callers needing concurrency add their own
//!   synchronization outside this crate.
//! - No persistence, no wire format.
//! - Public API surface is the five `Rc*` wrappers; the cores and the
//!   buffer are implementation details, kept public for the
//!   `bench_internal` benchmarks.

pub mod buffer;
pub mod hash_map;
pub mod heap;
pub mod linked_list;
pub mod queue;
mod queue_proptest;
pub mod stack;

// Public surface
pub use hash_map::RcHashMap;
pub use heap::RcHeap;
pub use linked_list::RcList;
pub use queue::RcQueue;
pub use stack::RcStack;
