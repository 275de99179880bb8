//! Chained hash map: structural core plus the shared-handle wrapper.
//!
//! Buckets are doubly linked lists (`ListCore`) of payloads; a payload
//! carries its key, its value, and the `u64` hash computed once at
//! insertion. Indexing always uses the stored hash, so `K: Hash` is never
//! invoked after insertion and a resize never calls back into user code.
//!
//! Resize policy, load factor 3/4: before a fresh insertion, if
//! `count + 1 >= bucket_count * 3/4` the bucket array doubles; after a
//! removal, if `count < (bucket_count / 2) * 3/4` and halving stays at or
//! above the constructed minimum, it halves. Both directions relocate every
//! payload into freshly allocated buckets by its stored hash — O(n) per
//! resize, amortized O(1) per operation.

use crate::linked_list::ListCore;
use slotmap::DefaultKey;
use std::borrow::Borrow;
use std::cell::{self, RefCell};
use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hash};
use std::rc::Rc;

#[derive(Debug)]
struct Payload<K, V> {
    key: K,
    value: V,
    hash: u64,
}

/// Structural map layer: bucket array of payload chains.
pub struct MapCore<K, V, S = RandomState> {
    hasher: S,
    buckets: Vec<ListCore<Payload<K, V>>>,
    count: usize,
    min_buckets: usize,
}

impl<K, V> MapCore<K, V>
where
    K: Eq + Hash,
{
    /// # Panics
    ///
    /// Panics if `min_buckets` is zero.
    pub fn new(min_buckets: usize) -> Self {
        Self::with_hasher(min_buckets, Default::default())
    }
}

impl<K, V, S> MapCore<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// # Panics
    ///
    /// Panics if `min_buckets` is zero.
    pub fn with_hasher(min_buckets: usize, hasher: S) -> Self {
        assert!(min_buckets > 0, "minimum bucket count must be at least 1");
        Self {
            hasher,
            buckets: empty_buckets(min_buckets),
            count: 0,
            min_buckets,
        }
    }

    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    #[inline]
    fn bucket_index(&self, hash: u64) -> usize {
        (hash % self.buckets.len() as u64) as usize
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Insert or overwrite. An existing key has its value replaced in
    /// place (the old value is returned and `len` does not change); a
    /// fresh key is appended to its chain after the grow check.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.make_hash(&key);
        let b = self.bucket_index(hash);
        if let Some(k) = self.buckets[b].find_key(|p| p.hash == hash && p.key == key) {
            let payload = self.buckets[b].data_mut(k).expect("found key is live");
            return Some(std::mem::replace(&mut payload.value, value));
        }
        if 4 * (self.count + 1) >= 3 * self.buckets.len() {
            self.resize(self.buckets.len() * 2);
        }
        let b = self.bucket_index(hash);
        self.buckets[b].push_back(Payload { key, value, hash });
        self.count += 1;
        None
    }

    /// Non-panicking lookup: scan the target bucket only.
    pub fn find<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(q);
        let b = self.bucket_index(hash);
        let k = self.buckets[b].find_key(|p| p.hash == hash && p.key.borrow() == q)?;
        self.buckets[b].data(k).map(|p| &p.value)
    }

    pub fn find_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(q);
        let b = self.bucket_index(hash);
        let k = self.buckets[b].find_key(|p| p.hash == hash && p.key.borrow() == q)?;
        self.buckets[b].data_mut(k).map(|p| &mut p.value)
    }

    /// # Panics
    ///
    /// Panics if the key is absent — a missing key on `get` is a caller
    /// error, and no sentinel value exists for a generic `V`.
    pub fn get<Q>(&self, q: &Q) -> &V
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.find(q) {
            Some(v) => v,
            None => panic!("get on a missing key"),
        }
    }

    /// Unlink and return the value for `q`, then run the shrink check.
    ///
    /// # Panics
    ///
    /// Panics if the key is absent.
    pub fn remove<Q>(&mut self, q: &Q) -> V
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(q);
        let b = self.bucket_index(hash);
        let k = self
            .buckets[b]
            .find_key(|p| p.hash == hash && p.key.borrow() == q)
            .expect("remove on a missing key");
        let payload = self.buckets[b].unlink(k);
        self.count -= 1;
        let n = self.buckets.len();
        if 8 * self.count < 3 * n && n / 2 >= self.min_buckets {
            self.resize(n / 2);
        }
        payload.value
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find(q).is_some()
    }

    /// Full O(n) scan across every bucket.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.buckets
            .iter()
            .any(|bucket| bucket.find_key(|p| &p.value == value).is_some())
    }

    /// Apply `f` to the value for `q` in place. The closed-form
    /// replacement for compound-assignment operators on map entries.
    ///
    /// # Panics
    ///
    /// Panics if the key is absent.
    pub fn update_with<Q, F>(&mut self, q: &Q, f: F)
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&mut V),
    {
        match self.find_mut(q) {
            Some(v) => f(v),
            None => panic!("update_with on a missing key"),
        }
    }

    /// Discard all buckets and reallocate at the minimum bucket count.
    pub fn clear(&mut self) {
        self.buckets = empty_buckets(self.min_buckets);
        self.count = 0;
    }

    /// Shared shape for grow and shrink: allocate fresh buckets of the
    /// target size and relocate every payload by its stored hash. Keys are
    /// unique, so appending reproduces exactly the chains that key-by-key
    /// re-insertion would build, without re-invoking `K: Hash` or `K: Eq`.
    fn resize(&mut self, new_count: usize) {
        let old = std::mem::replace(&mut self.buckets, empty_buckets(new_count));
        for mut bucket in old {
            while !bucket.is_empty() {
                let payload = bucket.pop_front();
                let b = self.bucket_index(payload.hash);
                self.buckets[b].push_back(payload);
            }
        }
    }

    /// Visit each entry, bucket by bucket, chains in insertion order.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V),
    {
        for bucket in &self.buckets {
            let mut cursor = bucket.first_key();
            while let Some(k) = cursor {
                let payload = bucket.data(k).expect("cursor key is live under borrow");
                f(&payload.key, &payload.value);
                cursor = bucket.next_key(k);
            }
        }
    }
}

fn empty_buckets<K, V>(n: usize) -> Vec<ListCore<Payload<K, V>>> {
    (0..n).map(|_| ListCore::new()).collect()
}

/// A chained hash map whose clones share one bucket array.
///
/// `Clone` copies the handle, not the entries; storage is released exactly
/// when the last handle drops. Single-threaded (`!Send + !Sync` via `Rc`).
pub struct RcHashMap<K, V, S = RandomState> {
    core: Rc<RefCell<MapCore<K, V, S>>>,
}

impl<K, V> RcHashMap<K, V>
where
    K: Eq + Hash,
{
    /// # Panics
    ///
    /// Panics if `min_buckets` is zero.
    pub fn new(min_buckets: usize) -> Self {
        Self {
            core: Rc::new(RefCell::new(MapCore::new(min_buckets))),
        }
    }
}

impl<K, V, S> RcHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// # Panics
    ///
    /// Panics if `min_buckets` is zero.
    pub fn with_hasher(min_buckets: usize, hasher: S) -> Self {
        Self {
            core: Rc::new(RefCell::new(MapCore::with_hasher(min_buckets, hasher))),
        }
    }

    pub fn len(&self) -> usize {
        RefCell::borrow(&self.core).len()
    }

    pub fn is_empty(&self) -> bool {
        RefCell::borrow(&self.core).is_empty()
    }

    pub fn bucket_count(&self) -> usize {
        RefCell::borrow(&self.core).bucket_count()
    }

    /// Insert or overwrite; see [`MapCore::insert`].
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.core.borrow_mut().insert(key, value)
    }

    /// Borrow the value for `q`.
    ///
    /// # Panics
    ///
    /// Panics if the key is absent. Use [`RcHashMap::find`] for the
    /// non-panicking lookup.
    pub fn get<Q>(&self, q: &Q) -> cell::Ref<'_, V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let core = RefCell::borrow(&self.core);
        assert!(core.contains_key(q), "get on a missing key");
        cell::Ref::map(core, |c| c.get(q))
    }

    /// Borrow the value for `q`, or `None` when absent.
    pub fn find<Q>(&self, q: &Q) -> Option<cell::Ref<'_, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let core = RefCell::borrow(&self.core);
        if core.find(q).is_none() {
            return None;
        }
        Some(cell::Ref::map(core, |c| {
            c.find(q).expect("checked is_some above")
        }))
    }

    /// Remove and return the value for `q`.
    ///
    /// # Panics
    ///
    /// Panics if the key is absent.
    pub fn remove<Q>(&self, q: &Q) -> V
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.core.borrow_mut().remove(q)
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        RefCell::borrow(&self.core).contains_key(q)
    }

    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        RefCell::borrow(&self.core).contains_value(value)
    }

    /// Apply `f` to the value for `q` in place.
    ///
    /// # Panics
    ///
    /// Panics if the key is absent.
    pub fn update_with<Q, F>(&self, q: &Q, f: F)
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&mut V),
    {
        self.core.borrow_mut().update_with(q, f);
    }

    /// Discard all buckets and reallocate at the minimum bucket count.
    pub fn clear(&self) {
        self.core.borrow_mut().clear();
    }

    /// Visit each entry; bucket order, chains in insertion order.
    pub fn for_each<F>(&self, f: F)
    where
        F: FnMut(&K, &V),
    {
        RefCell::borrow(&self.core).for_each(f);
    }

    /// Restartable iterator over `(key, value)` pairs, cloned out of the
    /// shared storage. The view is live; a resize between steps ends the
    /// iteration early rather than repeating or inventing entries.
    pub fn iter(&self) -> Iter<K, V, S> {
        Iter {
            core: Rc::clone(&self.core),
            bucket: 0,
            cursor: None,
        }
    }

    /// True when both handles share the same bucket array.
    pub fn shares_storage(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.core, &other.core)
    }
}

impl<K, V, S> Clone for RcHashMap<K, V, S> {
    /// Shares the bucket array; does not copy entries.
    fn clone(&self) -> Self {
        Self {
            core: Rc::clone(&self.core),
        }
    }
}

/// Live-view iterator over an `RcHashMap`.
pub struct Iter<K, V, S = RandomState> {
    core: Rc<RefCell<MapCore<K, V, S>>>,
    bucket: usize,
    cursor: Option<DefaultKey>,
}

impl<K, V, S> Iterator for Iter<K, V, S>
where
    K: Clone,
    V: Clone,
{
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        let core = RefCell::borrow(&self.core);
        loop {
            if let Some(k) = self.cursor {
                if self.bucket >= core.buckets.len() {
                    return None;
                }
                let bucket = &core.buckets[self.bucket];
                return match bucket.data(k) {
                    Some(payload) => {
                        let item = (payload.key.clone(), payload.value.clone());
                        self.cursor = bucket.next_key(k);
                        if self.cursor.is_none() {
                            self.bucket += 1;
                        }
                        Some(item)
                    }
                    // The node under the cursor vanished (mutation since
                    // the last step): end rather than guess.
                    None => None,
                };
            }
            while self.bucket < core.buckets.len() {
                if let Some(first) = core.buckets[self.bucket].first_key() {
                    self.cursor = Some(first);
                    break;
                }
                self.bucket += 1;
            }
            self.cursor?;
        }
    }
}
