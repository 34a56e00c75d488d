//! Dense array-backed scalar containers keyed by indexed identities.
//!
//! A [`DenseMap`] is a map-shaped wrapper over a flat `Vec`, sized to the
//! universe's `max_index + 1`. Hot simulation loops mutate it by direct
//! index-addressed writes; aggregate statistics (total, average, extrema)
//! are recomputed lazily by a full scan the first time they are read after
//! a mutation. Invalidation is coarse: one dirty flag per aggregate
//! family, never per cell.

use std::cell::Cell;
use std::sync::Arc;

use crate::cache::CacheState;
use crate::error::ShapeError;
use crate::index_set::IndexSet;
use crate::indexed::Indexed;
use crate::numeric::Numeric;
use crate::random::RandomService;

/// Floating-point container for probability mass, scores, and rates.
pub type DoubleMap<K> = DenseMap<K, f64>;

/// Integer container for typed population counts.
pub type IntMap<K> = DenseMap<K, i64>;

/// Default epsilon for [`DenseMap::same`].
pub const DEFAULT_THRESHOLD: f64 = 1e-7;

#[derive(Debug, Clone, Copy, Default)]
struct Extrema {
    max_pos: Option<usize>,
    min_pos: Option<usize>,
}

/// Dense mapping from a universe's keys to scalar values, with lazily
/// cached aggregates.
///
/// The map holds a shared reference to its [`IndexSet`] and never copies
/// it; many containers over one universe are cheap. Aggregate reads go
/// through interior mutability, so the type is not `Sync`.
#[derive(Debug, Clone)]
pub struct DenseMap<K: Indexed, V: Numeric> {
    keys: Arc<IndexSet<K>>,
    data: Vec<V>,
    initial: V,
    total: Cell<V>,
    totals_state: Cell<CacheState>,
    extrema: Cell<Extrema>,
    extrema_state: Cell<CacheState>,
}

impl<K: Indexed, V: Numeric> DenseMap<K, V> {
    /// Container over `keys` with every slot at `V::ZERO`.
    #[must_use]
    pub fn new(keys: Arc<IndexSet<K>>) -> Self {
        Self::with_initial(keys, V::ZERO)
    }

    /// Container whose slots start at (and reset to) `initial`.
    #[must_use]
    pub fn with_initial(keys: Arc<IndexSet<K>>, initial: V) -> Self {
        let data = vec![initial; keys.capacity()];
        Self {
            keys,
            data,
            initial,
            total: Cell::new(V::ZERO),
            totals_state: Cell::new(CacheState::Dirty),
            extrema: Cell::new(Extrema::default()),
            extrema_state: Cell::new(CacheState::Dirty),
        }
    }

    /// Container seeded from a raw slice laid out by index value.
    ///
    /// The slice length must equal the universe's capacity.
    pub fn with_values(keys: Arc<IndexSet<K>>, values: &[V]) -> Result<Self, ShapeError> {
        let mut map = Self::new(keys);
        map.put_slice(values)?;
        Ok(map)
    }

    /// The universe this container is built over.
    #[must_use]
    pub fn index_set(&self) -> &Arc<IndexSet<K>> {
        &self.keys
    }

    /// Allocated slot count (`max_index + 1`), the denominator of
    /// [`average`](Self::average). Over sparse universes this exceeds the
    /// member-key count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The value slots reset to on [`clear`](Self::clear).
    #[must_use]
    pub fn initial(&self) -> V {
        self.initial
    }

    #[inline]
    #[must_use]
    pub fn get(&self, key: &K) -> V {
        self.data[key.index()]
    }

    #[inline]
    pub fn put(&mut self, key: &K, value: V) {
        self.data[key.index()] = value;
        self.mark_dirty();
    }

    #[inline]
    pub fn add(&mut self, key: &K, amount: V) {
        self.data[key.index()] += amount;
        self.mark_dirty();
    }

    #[inline]
    pub fn increment(&mut self, key: &K) {
        self.add(key, V::ONE);
    }

    /// Overwrite every slot from a raw slice laid out by index value.
    pub fn put_slice(&mut self, values: &[V]) -> Result<(), ShapeError> {
        if values.len() != self.data.len() {
            return Err(ShapeError::LengthMismatch {
                expected: self.data.len(),
                got: values.len(),
            });
        }
        self.data.copy_from_slice(values);
        self.mark_dirty();
        Ok(())
    }

    /// Reset every slot to the initial value.
    pub fn clear(&mut self) {
        self.data.fill(self.initial);
        self.mark_dirty();
    }

    /// Raise every slot below `floor` up to `floor`.
    pub fn clamp_min(&mut self, floor: V) {
        for v in &mut self.data {
            if *v < floor {
                *v = floor;
            }
        }
        self.mark_dirty();
    }

    fn mark_dirty(&mut self) {
        self.totals_state.set(CacheState::Dirty);
        self.extrema_state.set(CacheState::Dirty);
    }

    /// Sum over all slots. O(n) on the first read after a mutation, O(1)
    /// afterwards.
    #[must_use]
    pub fn total(&self) -> V {
        if self.totals_state.get().is_dirty() {
            let mut total = V::ZERO;
            for v in &self.data {
                total += *v;
            }
            self.total.set(total);
            self.totals_state.set(CacheState::Clean);
        }
        self.total.get()
    }

    /// Total divided by the allocated slot count, not the member-key count.
    #[must_use]
    pub fn average(&self) -> f64 {
        self.total().to_f64() / self.data.len() as f64
    }

    fn refresh_extrema(&self) {
        let mut extrema = Extrema::default();
        let mut max_val = V::ZERO;
        let mut min_val = V::ZERO;
        for (position, key) in self.keys.iter().enumerate() {
            let val = self.get(key);
            if extrema.max_pos.is_none() || val > max_val {
                max_val = val;
                extrema.max_pos = Some(position);
            }
            if extrema.min_pos.is_none() || val < min_val {
                min_val = val;
                extrema.min_pos = Some(position);
            }
        }
        self.extrema.set(extrema);
        self.extrema_state.set(CacheState::Clean);
    }

    /// Key holding the largest value. Ties resolve to the first key in
    /// iteration order (the scan only moves on a strictly greater value).
    /// `None` only for an empty universe.
    #[must_use]
    pub fn max_key(&self) -> Option<&K> {
        if self.extrema_state.get().is_dirty() {
            self.refresh_extrema();
        }
        self.extrema.get().max_pos.and_then(|p| self.keys.get(p))
    }

    /// Key holding the smallest value; same tie rule as
    /// [`max_key`](Self::max_key).
    #[must_use]
    pub fn min_key(&self) -> Option<&K> {
        if self.extrema_state.get().is_dirty() {
            self.refresh_extrema();
        }
        self.extrema.get().min_pos.and_then(|p| self.keys.get(p))
    }

    /// Member keys in iteration order.
    pub fn keys(&self) -> std::slice::Iter<'_, K> {
        self.keys.iter()
    }

    /// `(key, value)` pairs over member keys in iteration order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, V)> {
        self.keys.iter().map(|k| (k, self.get(k)))
    }

    fn check_universe(&self, other: &Self) -> Result<(), ShapeError> {
        if self.data.len() != other.data.len() {
            return Err(ShapeError::UniverseMismatch {
                left: self.data.len(),
                right: other.data.len(),
            });
        }
        Ok(())
    }

    /// Overwrite `target`'s member slots with this container's values.
    pub fn copy_into(&self, target: &mut Self) -> Result<(), ShapeError> {
        self.check_universe(target)?;
        for key in self.keys.iter() {
            target.put(key, self.get(key));
        }
        Ok(())
    }

    /// Add this container's member values into `target`.
    pub fn add_into(&self, target: &mut Self) -> Result<(), ShapeError> {
        self.check_universe(target)?;
        for key in self.keys.iter() {
            target.add(key, self.get(key));
        }
        Ok(())
    }

    /// Element-wise `self - subtractor`, written into `target`.
    pub fn subtract_into(&self, subtractor: &Self, target: &mut Self) -> Result<(), ShapeError> {
        self.check_universe(subtractor)?;
        self.check_universe(target)?;
        for key in self.keys.iter() {
            target.put(key, self.get(key) - subtractor.get(key));
        }
        Ok(())
    }

    /// Element-wise `factor * self`, written into `target`.
    pub fn multiply_into(&self, factor: V, target: &mut Self) -> Result<(), ShapeError> {
        self.check_universe(target)?;
        for key in self.keys.iter() {
            target.put(key, factor * self.get(key));
        }
        Ok(())
    }

    /// Sum over member keys of element-wise products.
    pub fn dot_product(&self, other: &Self) -> Result<V, ShapeError> {
        self.check_universe(other)?;
        let mut value = V::ZERO;
        for key in self.keys.iter() {
            value += self.get(key) * other.get(key);
        }
        Ok(value)
    }

    /// Element-wise comparison within [`DEFAULT_THRESHOLD`]. Containers
    /// over universes of different capacity are never the same.
    #[must_use]
    pub fn same(&self, other: &Self) -> bool {
        self.same_within(other, DEFAULT_THRESHOLD)
    }

    /// Element-wise comparison within a caller-supplied epsilon.
    #[must_use]
    pub fn same_within(&self, other: &Self, threshold: f64) -> bool {
        if self.data.len() != other.data.len() {
            return false;
        }
        self.keys
            .iter()
            .all(|k| (self.get(k).to_f64() - other.get(k).to_f64()).abs() <= threshold)
    }

    /// Fresh container with the same universe and initial value, no data.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        Self::with_initial(self.keys.clone(), self.initial)
    }

    /// Roulette-wheel draw proportional to stored values, without
    /// normalisation.
    ///
    /// Walks keys in iteration order accumulating a running sum and selects
    /// the first key whose sum is strictly greater than the drawn
    /// threshold; zero-valued keys are therefore never selected. With
    /// `allow_null == false` the threshold is drawn from `[0, total)`, so a
    /// container with positive total always yields a key. With
    /// `allow_null == true` the threshold is drawn from `[0, 1)` and a
    /// container whose values sum below the draw legitimately yields
    /// `None`; sub-1.0 probability mass means "no selection" is a real
    /// outcome. A zero-total container always yields `None`.
    pub fn sample<S: RandomService + ?Sized>(
        &self,
        service: &mut S,
        allow_null: bool,
    ) -> Option<&K> {
        let threshold = if allow_null {
            service.uniform01()
        } else {
            service.uniform01() * self.total().to_f64()
        };
        let mut running = 0.0;
        for key in self.keys.iter() {
            running += self.get(key).to_f64();
            if running > threshold {
                return Some(key);
            }
        }
        None
    }
}

impl<K: Indexed + Clone> IntMap<K> {
    /// Draw one unit from a population of typed counts, without
    /// replacement: the first key in iteration order with a positive
    /// running count is selected and decremented by one. Returns `None`
    /// exactly when the total count is zero.
    pub fn consume(&mut self) -> Option<K> {
        self.consume_above(0)
    }

    /// Like [`consume`](Self::consume), but the unit removed is chosen
    /// uniformly among the remaining units via the random service's
    /// integer draw.
    pub fn consume_sampled<S: RandomService + ?Sized>(&mut self, service: &mut S) -> Option<K> {
        let total = self.total();
        if total <= 0 {
            return None;
        }
        let threshold = service.int_range(0, total - 1);
        self.consume_above(threshold)
    }

    fn consume_above(&mut self, threshold: i64) -> Option<K> {
        let mut running = 0;
        let mut chosen = None;
        for key in self.keys.iter() {
            running += self.get(key);
            if running > threshold {
                chosen = Some(key.clone());
                break;
            }
        }
        if let Some(key) = &chosen {
            self.add(key, -1);
        }
        chosen
    }
}
