//! The animation catalog: shape storage, diff dispatch, and the
//! pre-computed/dynamic tick paths.
//!
//! Grounded on `Manager` in `shapes.go`.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use indexmap::IndexMap;
use mctick_core::{BlockStore, OrbitPlane, SetBlockRequest, Vec3};
use mctick_shapes::shape::{Movement, Orbit, RandomSpec, Shape, Spin};

use crate::error::ManagerError;

type BlockKey = (i32, i32, i32);

/// A single tick's worth of clear/fill placements, computed once during
/// `precompute()` and replayed during pre-computed ticking.
#[derive(Clone, Debug, Default)]
pub struct TickDiff {
    /// Cells that went from non-air to air (or to a different shape).
    pub clears: Vec<SetBlockRequest>,
    /// Cells whose final state changed (including newly filled cells).
    pub fills: Vec<SetBlockRequest>,
}

/// Owns the named shape catalog, the aggregated `active` placement map,
/// and (once precomputed) the frozen per-tick diff timeline.
pub struct AnimationManager {
    shapes: IndexMap<String, Shape>,
    active: HashMap<BlockKey, i32>,
    diffs: Vec<TickDiff>,
    setblock_time: Duration,
    precomputed: bool,
    precomputed_max_tick: u64,
    last_tick: u64,
}

impl Default for AnimationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationManager {
    /// An empty manager.
    pub fn new() -> Self {
        Self {
            shapes: IndexMap::new(),
            active: HashMap::new(),
            diffs: Vec::new(),
            setblock_time: Duration::ZERO,
            precomputed: false,
            precomputed_max_tick: 0,
            last_tick: 0,
        }
    }

    fn ensure_mutable(&self) -> Result<(), ManagerError> {
        if self.precomputed {
            return Err(ManagerError::AlreadyPrecomputed);
        }
        Ok(())
    }

    /// Look up a shape by name.
    pub fn shape(&self, name: &str) -> Option<&Shape> {
        self.shapes.get(name)
    }

    /// Accumulated time spent inside `BlockStore::batch_set_blocks`.
    pub fn setblock_time(&self) -> Duration {
        self.setblock_time
    }

    /// Whether `precompute()` has been called.
    pub fn is_precomputed(&self) -> bool {
        self.precomputed
    }

    fn store_new_shape(&mut self, shape: Shape) -> Result<&Shape, ManagerError> {
        if self.shapes.contains_key(&shape.name) {
            return Err(ManagerError::DuplicateName { name: shape.name });
        }
        let name = shape.name.clone();
        self.shapes.insert_sorted(name.clone(), shape);
        Ok(self.shapes.get(&name).expect("just inserted"))
    }

    fn dispatch_initial<S: BlockStore>(&mut self, store: &mut S, name: &str) {
        let placements = self.shapes[name].blocks_at_tick(0);
        self.shapes[name].last_blocks = placements.clone();
        if placements.is_empty() {
            return;
        }
        for b in &placements {
            let key = b.key();
            if b.is_clear() {
                self.active.remove(&key);
            } else {
                self.active.insert(key, b.state);
            }
        }
        self.place_blocks(store, &placements);
    }

    /// Create and register a sphere shape, dispatching its tick-0
    /// placements immediately.
    pub fn create_sphere<S: BlockStore>(
        &mut self,
        store: &mut S,
        name: impl Into<String>,
        origin: Vec3,
        radius: i32,
        filled: bool,
        block_state: i32,
    ) -> Result<(), ManagerError> {
        self.ensure_mutable()?;
        let name = name.into();
        let shape = Shape::new_sphere(name.clone(), origin, radius, filled, block_state)?;
        self.store_new_shape(shape)?;
        self.dispatch_initial(store, &name);
        Ok(())
    }

    /// Create and register a rect shape, dispatching its tick-0
    /// placements immediately.
    #[allow(clippy::too_many_arguments)]
    pub fn create_rect<S: BlockStore>(
        &mut self,
        store: &mut S,
        name: impl Into<String>,
        origin: Vec3,
        width: i32,
        height: i32,
        filled: bool,
        block_state: i32,
    ) -> Result<(), ManagerError> {
        self.ensure_mutable()?;
        let name = name.into();
        let shape = Shape::new_rect(name.clone(), origin, width, height, filled, block_state)?;
        self.store_new_shape(shape)?;
        self.dispatch_initial(store, &name);
        Ok(())
    }

    /// Create and register a ring shape, dispatching its tick-0
    /// placements immediately.
    pub fn create_ring<S: BlockStore>(
        &mut self,
        store: &mut S,
        name: impl Into<String>,
        origin: Vec3,
        inner_radius: i32,
        outer_radius: i32,
        block_state: i32,
    ) -> Result<(), ManagerError> {
        self.ensure_mutable()?;
        let name = name.into();
        let shape = Shape::new_ring(name.clone(), origin, inner_radius, outer_radius, block_state)?;
        self.store_new_shape(shape)?;
        self.dispatch_initial(store, &name);
        Ok(())
    }

    /// Create and register a random shape, dispatching its tick-0
    /// placements (if any fall within the active window) immediately.
    #[allow(clippy::too_many_arguments)]
    pub fn create_random<S: BlockStore>(
        &mut self,
        store: &mut S,
        name: impl Into<String>,
        start_tick: u64,
        end_tick: u64,
        min: (i32, i32, i32),
        max: (i32, i32, i32),
        block_state: i32,
        block_num: u64,
        seed: u64,
    ) -> Result<(), ManagerError> {
        self.ensure_mutable()?;
        let name = name.into();
        if self.shapes.contains_key(&name) {
            return Err(ManagerError::DuplicateName { name });
        }
        let random = RandomSpec::new(start_tick, end_tick, min, max, block_state, block_num, seed)?;
        let shape = Shape::new_random(name.clone(), block_state, random);
        self.store_new_shape(shape)?;
        self.dispatch_initial(store, &name);
        Ok(())
    }

    /// Register a linear movement on an existing shape.
    pub fn add_move(
        &mut self,
        name: &str,
        dx: f64,
        dy: f64,
        dz: f64,
        start_tick: u64,
        end_tick: u64,
    ) -> Result<(), ManagerError> {
        self.ensure_mutable()?;
        let shape = self
            .shapes
            .get_mut(name)
            .ok_or_else(|| ManagerError::UnknownShape { name: name.to_string() })?;
        let mv = Movement::new(dx, dy, dz, start_tick, end_tick)?;
        shape.moves.push(mv);
        Ok(())
    }

    /// Register a spin on an existing shape.
    pub fn add_spin(
        &mut self,
        name: &str,
        rad_x: f64,
        rad_y: f64,
        rad_z: f64,
        start_tick: u64,
        end_tick: u64,
    ) -> Result<(), ManagerError> {
        self.ensure_mutable()?;
        let shape = self
            .shapes
            .get_mut(name)
            .ok_or_else(|| ManagerError::UnknownShape { name: name.to_string() })?;
        let sp = Spin::new(rad_x, rad_y, rad_z, start_tick, end_tick)?;
        shape.spins.push(sp);
        Ok(())
    }

    /// Register an orbit on an existing shape.
    #[allow(clippy::too_many_arguments)]
    pub fn add_orbit(
        &mut self,
        name: &str,
        plane: OrbitPlane,
        radius: f64,
        angular_speed: f64,
        phase: f64,
        start_tick: u64,
        end_tick: u64,
    ) -> Result<(), ManagerError> {
        self.ensure_mutable()?;
        let shape = self
            .shapes
            .get_mut(name)
            .ok_or_else(|| ManagerError::UnknownShape { name: name.to_string() })?;
        let orbit = Orbit::new(plane, radius, angular_speed, phase, start_tick, end_tick)?;
        shape.orbits.push(orbit);
        Ok(())
    }

    /// Schedule a registered shape for destruction at `tick`.
    pub fn destroy(&mut self, name: &str, tick: u64) -> Result<(), ManagerError> {
        self.ensure_mutable()?;
        let shape = self
            .shapes
            .get_mut(name)
            .ok_or_else(|| ManagerError::UnknownShape { name: name.to_string() })?;
        shape.schedule_destroy(tick);
        Ok(())
    }

    fn aggregate(&self, t: u64) -> HashMap<BlockKey, i32> {
        let mut state = HashMap::new();
        for shape in self.shapes.values() {
            for b in shape.blocks_at_tick(t) {
                if b.is_clear() {
                    continue;
                }
                state.insert(b.key(), b.state);
            }
        }
        state
    }

    fn max_animation_tick(&self) -> u64 {
        self.shapes.values().map(Shape::max_tick).max().unwrap_or(0)
    }

    /// Freeze the manager and pre-compute the diff timeline up to the
    /// animation horizon (or `max_tick_override`, which must be `>=` the
    /// natural horizon). No further mutation is possible afterwards.
    pub fn precompute(&mut self, max_tick_override: Option<u64>) -> Result<u64, ManagerError> {
        if self.precomputed {
            return Err(ManagerError::PrecomputeTwice);
        }
        if self.shapes.is_empty() {
            return Err(ManagerError::EmptyCatalog);
        }
        let mut max_tick = self.max_animation_tick();
        if let Some(override_tick) = max_tick_override {
            if override_tick < max_tick {
                return Err(ManagerError::OverrideBelowHorizon {
                    requested: override_tick,
                    horizon: max_tick,
                });
            }
            max_tick = override_tick;
        }

        let base_state = self.aggregate(0);
        let mut diffs = vec![TickDiff::default(); (max_tick + 1) as usize];
        let mut prev = base_state.clone();
        for tick in 1..=max_tick {
            let curr = self.aggregate(tick);
            diffs[tick as usize] = diff_states(&prev, &curr);
            prev = curr;
        }

        self.diffs = diffs;
        self.active = base_state;
        self.precomputed = true;
        self.precomputed_max_tick = max_tick;
        self.last_tick = 0;
        Ok(max_tick)
    }

    /// Advance to tick `t`, dispatching clears then fills to `store`.
    pub fn tick<S: BlockStore>(&mut self, store: &mut S, t: u64) {
        if self.precomputed {
            self.tick_precomputed(store, t);
        } else {
            self.tick_dynamic(store, t);
        }
    }

    fn tick_precomputed<S: BlockStore>(&mut self, store: &mut S, t: u64) {
        let target = t.min(self.precomputed_max_tick);
        if target <= self.last_tick {
            return;
        }
        let mut clears = Vec::new();
        let mut fills = Vec::new();
        for step in (self.last_tick + 1)..=target {
            let diff = self.diffs[step as usize].clone();
            for b in &diff.clears {
                self.active.remove(&b.key());
            }
            clears.extend(diff.clears);
            for b in &diff.fills {
                if b.is_clear() {
                    self.active.remove(&b.key());
                } else {
                    self.active.insert(b.key(), b.state);
                }
            }
            fills.extend(diff.fills);
        }
        self.last_tick = target;
        if !clears.is_empty() {
            self.place_blocks(store, &clears);
        }
        if !fills.is_empty() {
            self.place_blocks(store, &fills);
        }
    }

    fn tick_dynamic<S: BlockStore>(&mut self, store: &mut S, t: u64) {
        if self.shapes.is_empty() {
            let prev_active = std::mem::take(&mut self.active);
            if prev_active.is_empty() {
                return;
            }
            let clears: Vec<SetBlockRequest> = prev_active
                .keys()
                .map(|&(x, y, z)| SetBlockRequest::new(x, y, z, 0))
                .collect();
            self.place_blocks(store, &clears);
            return;
        }

        let mut current = HashMap::with_capacity(self.active.len());
        let mut expired = Vec::new();
        for name in self.shapes.keys().cloned().collect::<Vec<_>>() {
            let shape = self.shapes.get_mut(&name).expect("key from shapes.keys()");
            let placements = shape.blocks_at_tick(t);
            shape.last_blocks = placements.clone();
            if shape.destroy_scheduled && t >= shape.destroy_tick {
                expired.push(name);
                continue;
            }
            for b in placements {
                if b.is_clear() {
                    continue;
                }
                current.insert(b.key(), b.state);
            }
        }

        let prev_active = std::mem::replace(&mut self.active, current.clone());
        self.last_tick = t;
        for name in &expired {
            self.shapes.shift_remove(name);
        }

        let clears: Vec<SetBlockRequest> = prev_active
            .keys()
            .filter(|k| !current.contains_key(*k))
            .map(|&(x, y, z)| SetBlockRequest::new(x, y, z, 0))
            .collect();
        let fills: Vec<SetBlockRequest> = current
            .iter()
            .filter(|(k, &state)| prev_active.get(*k) != Some(&state))
            .map(|(&(x, y, z), &state)| SetBlockRequest::new(x, y, z, state))
            .collect();
        if !clears.is_empty() {
            self.place_blocks(store, &clears);
        }
        if !fills.is_empty() {
            self.place_blocks(store, &fills);
        }
    }

    /// Remove every shape and clear every active cell.
    pub fn clear<S: BlockStore>(&mut self, store: &mut S) {
        if self.shapes.is_empty() && self.active.is_empty() {
            return;
        }
        let mut seen = std::collections::HashSet::new();
        let mut to_clear = Vec::new();
        for shape in self.shapes.values() {
            for b in &shape.last_blocks {
                let key = b.key();
                if seen.insert(key) {
                    to_clear.push(SetBlockRequest::new(key.0, key.1, key.2, 0));
                }
            }
        }
        for &key in self.active.keys() {
            if seen.insert(key) {
                to_clear.push(SetBlockRequest::new(key.0, key.1, key.2, 0));
            }
        }
        self.shapes.clear();
        self.active.clear();
        self.diffs.clear();
        self.precomputed = false;
        self.precomputed_max_tick = 0;
        self.last_tick = 0;
        if !to_clear.is_empty() {
            self.place_blocks(store, &to_clear);
        }
    }

    fn place_blocks<S: BlockStore>(&mut self, store: &mut S, blocks: &[SetBlockRequest]) {
        let start = Instant::now();
        store.batch_set_blocks(blocks);
        self.setblock_time += start.elapsed();
    }
}

fn diff_states(prev: &HashMap<BlockKey, i32>, curr: &HashMap<BlockKey, i32>) -> TickDiff {
    let clears = prev
        .keys()
        .filter(|k| !curr.contains_key(*k))
        .map(|&(x, y, z)| SetBlockRequest::new(x, y, z, 0))
        .collect();
    let fills = curr
        .iter()
        .filter(|(k, &state)| prev.get(*k) != Some(&state))
        .map(|(&(x, y, z), &state)| SetBlockRequest::new(x, y, z, state))
        .collect();
    TickDiff { clears, fills }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mctick_test_utils::FakeBlockStore;

    #[test]
    fn create_sphere_dispatches_initial_placements() {
        let mut store = FakeBlockStore::new();
        let mut mgr = AnimationManager::new();
        mgr.create_sphere(&mut store, "s1", Vec3::ZERO, 1, true, 5)
            .unwrap();
        assert!(store.cell_count() > 0);
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let mut store = FakeBlockStore::new();
        let mut mgr = AnimationManager::new();
        mgr.create_sphere(&mut store, "s1", Vec3::ZERO, 1, true, 5)
            .unwrap();
        let err = mgr
            .create_sphere(&mut store, "s1", Vec3::ZERO, 1, true, 5)
            .unwrap_err();
        assert_eq!(err, ManagerError::DuplicateName { name: "s1".into() });
    }

    #[test]
    fn destroy_removes_blocks_on_next_tick() {
        let mut store = FakeBlockStore::new();
        let mut mgr = AnimationManager::new();
        mgr.create_sphere(&mut store, "s1", Vec3::ZERO, 1, true, 5)
            .unwrap();
        mgr.destroy("s1", 2).unwrap();
        mgr.tick(&mut store, 1);
        assert!(store.cell_count() > 0);
        mgr.tick(&mut store, 2);
        assert_eq!(store.cell_count(), 0);
    }

    #[test]
    fn precompute_then_mutate_is_rejected() {
        let mut store = FakeBlockStore::new();
        let mut mgr = AnimationManager::new();
        mgr.create_sphere(&mut store, "s1", Vec3::ZERO, 1, true, 5)
            .unwrap();
        mgr.precompute(None).unwrap();
        let err = mgr.destroy("s1", 5).unwrap_err();
        assert_eq!(err, ManagerError::AlreadyPrecomputed);
    }

    #[test]
    fn precompute_empty_catalog_errors() {
        let mut mgr = AnimationManager::new();
        assert_eq!(mgr.precompute(None).unwrap_err(), ManagerError::EmptyCatalog);
    }

    #[test]
    fn precompute_override_below_horizon_errors() {
        let mut store = FakeBlockStore::new();
        let mut mgr = AnimationManager::new();
        mgr.create_sphere(&mut store, "s1", Vec3::ZERO, 1, true, 5)
            .unwrap();
        mgr.add_move("s1", 1.0, 0.0, 0.0, 0, 10).unwrap();
        let err = mgr.precompute(Some(3)).unwrap_err();
        assert_eq!(
            err,
            ManagerError::OverrideBelowHorizon {
                requested: 3,
                horizon: 10
            }
        );
    }

    #[test]
    fn precomputed_and_dynamic_ticking_agree() {
        let mut dynamic_store = FakeBlockStore::new();
        let mut dynamic_mgr = AnimationManager::new();
        dynamic_mgr
            .create_sphere(&mut dynamic_store, "s1", Vec3::ZERO, 1, true, 5)
            .unwrap();
        dynamic_mgr.add_move("s1", 1.0, 0.0, 0.0, 0, 5).unwrap();

        let mut pre_store = FakeBlockStore::new();
        let mut pre_mgr = AnimationManager::new();
        pre_mgr
            .create_sphere(&mut pre_store, "s1", Vec3::ZERO, 1, true, 5)
            .unwrap();
        pre_mgr.add_move("s1", 1.0, 0.0, 0.0, 0, 5).unwrap();
        pre_mgr.precompute(None).unwrap();

        for t in 1..=5 {
            dynamic_mgr.tick(&mut dynamic_store, t);
            pre_mgr.tick(&mut pre_store, t);
            assert_eq!(dynamic_store.snapshot(), pre_store.snapshot());
        }
    }

    #[test]
    fn clear_empties_active_and_catalog() {
        let mut store = FakeBlockStore::new();
        let mut mgr = AnimationManager::new();
        mgr.create_sphere(&mut store, "s1", Vec3::ZERO, 1, true, 5)
            .unwrap();
        mgr.clear(&mut store);
        assert_eq!(store.cell_count(), 0);
        assert!(!mgr.is_precomputed());
        assert!(mgr.shape("s1").is_none());
    }
}

#[cfg(test)]
mod diff_proptests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn apply(diff: &TickDiff, base: &HashMap<BlockKey, i32>) -> HashMap<BlockKey, i32> {
        let mut next = base.clone();
        for b in &diff.clears {
            next.remove(&b.key());
        }
        for b in &diff.fills {
            next.insert(b.key(), b.state);
        }
        next
    }

    fn cell_map() -> impl Strategy<Value = HashMap<BlockKey, i32>> {
        prop::collection::hash_map(
            (-4i32..4, 0i32..8, -4i32..4),
            1i32..10,
            0..12,
        )
    }

    proptest! {
        #[test]
        fn apply_diff_of_a_and_b_to_a_reproduces_b(a in cell_map(), b in cell_map()) {
            let diff = diff_states(&a, &b);
            prop_assert_eq!(apply(&diff, &a), b);
        }
    }
}
