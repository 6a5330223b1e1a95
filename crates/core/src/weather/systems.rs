//! Pressure systems and fronts
//!
//! Systems drift along an abstract 0-1 "region position" axis. The region
//! itself sits at 0.5; a system's influence on local weather falls off with
//! distance from there (see [`WeatherSystem::centrality`]).
//!
//! Fronts are never spawned directly. They form between a high and a low
//! that drift within 0.3 of each other, and remember their parents by
//! [`SystemId`] so a pair only ever produces one live front.

use crate::core_types::season::Season;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Hourly chance of a new pressure system drifting in
const SPAWN_CHANCE: f64 = 0.05;
/// Spawn chance right after a thunderstorm
const SPAWN_CHANCE_AFTER_STORM: f64 = 0.02;
/// Maximum high/low separation for front formation
const FRONT_DISTANCE: f64 = 0.3;
/// Hourly intensity decay once a system is past half its life
const DECAY_PER_HOUR: f64 = 0.97;
/// Systems outside this position range have left the region
const POSITION_RANGE: (f64, f64) = (-0.2, 1.2);

/// Stable identifier, unique within one simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SystemId(u32);

impl SystemId {
    /// Raw identifier value
    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of weather system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SystemKind {
    /// Anticyclone: fair weather, rising pressure
    HighPressure,
    /// Cyclone: cloud, rain, falling pressure
    LowPressure,
    /// Cold air undercutting warm air
    ColdFront,
    /// Warm air overriding cold air
    WarmFront,
}

impl SystemKind {
    /// Fronts are the two front kinds
    #[must_use]
    pub fn is_front(self) -> bool {
        matches!(self, SystemKind::ColdFront | SystemKind::WarmFront)
    }

    /// The balancing kind used when the live set runs low
    ///
    /// Fronts are balanced by a low, since they already imply a high nearby.
    #[must_use]
    pub fn opposite(self) -> SystemKind {
        match self {
            SystemKind::LowPressure => SystemKind::HighPressure,
            SystemKind::HighPressure | SystemKind::ColdFront | SystemKind::WarmFront => {
                SystemKind::LowPressure
            }
        }
    }
}

impl fmt::Display for SystemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SystemKind::HighPressure => "High Pressure",
            SystemKind::LowPressure => "Low Pressure",
            SystemKind::ColdFront => "Cold Front",
            SystemKind::WarmFront => "Warm Front",
        };
        f.write_str(name)
    }
}

/// One pressure cell or front
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSystem {
    /// Stable identifier
    pub id: SystemId,
    /// Kind of system
    pub kind: SystemKind,
    /// Strength (0-1)
    pub intensity: f64,
    /// Hours since formation
    pub age: u32,
    /// Position on the region axis (region center at 0.5)
    pub position: f64,
    /// Distance travelled per hour
    pub movement_speed: f64,
    /// +1 or -1
    pub movement_direction: f64,
    /// Age at which the system dissipates
    pub max_age: u32,
    /// The high/low pair a front formed from
    pub parents: Option<(SystemId, SystemId)>,
}

impl WeatherSystem {
    /// Influence weight from distance to the region center
    ///
    /// 1.0 at the center, 0.4 at either edge of the 0-1 axis.
    #[must_use]
    pub fn centrality(&self) -> f64 {
        1.0 / (1.0 + 3.0 * (self.position - 0.5).abs())
    }

    /// Intensity scaled by centrality; the basis of every per-system term
    #[must_use]
    pub fn influence(&self) -> f64 {
        self.intensity * self.centrality()
    }

    /// Fraction of lifespan used (0-1)
    #[must_use]
    pub fn age_ratio(&self) -> f64 {
        if self.max_age == 0 {
            1.0
        } else {
            (f64::from(self.age) / f64::from(self.max_age)).min(1.0)
        }
    }

    /// In the first third of its life
    ///
    /// Young cold fronts bring cloud, rain and a pressure dip; older ones
    /// clear out and let pressure rebound.
    #[must_use]
    pub fn is_young(&self) -> bool {
        self.age * 3 < self.max_age
    }

    /// Whether this front was formed from the given (unordered) pair
    #[must_use]
    pub fn has_parents(&self, a: SystemId, b: SystemId) -> bool {
        matches!(self.parents, Some((x, y)) if (x == a && y == b) || (x == b && y == a))
    }

    fn advance_hour(&mut self) {
        self.age = self.age.saturating_add(1);
        self.position += self.movement_speed * self.movement_direction;
        if self.age * 2 > self.max_age {
            self.intensity *= DECAY_PER_HOUR;
        }
    }

    fn is_expired(&self) -> bool {
        self.age >= self.max_age
            || self.position < POSITION_RANGE.0
            || self.position > POSITION_RANGE.1
    }
}

/// Hour-level context the system life cycle depends on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemContext {
    /// A thunderstorm is in progress (new fronts burn out faster)
    pub thunderstorm_active: bool,
    /// Post-storm cooldown is running (fewer new systems)
    pub storm_cooldown_active: bool,
}

/// Owns the live set of weather systems
///
/// The set always holds at least one system after [`initialize`] and after
/// every [`update`]; [`enforce_minimum_systems`] is the single place that
/// guarantees it.
///
/// [`initialize`]: WeatherSystemService::initialize
/// [`update`]: WeatherSystemService::update
/// [`enforce_minimum_systems`]: WeatherSystemService::enforce_minimum_systems
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeatherSystemService {
    systems: Vec<WeatherSystem>,
    next_id: u32,
}

impl WeatherSystemService {
    /// Create an empty service; call [`initialize`](Self::initialize) next
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Live systems
    #[must_use]
    pub fn systems(&self) -> &[WeatherSystem] {
        &self.systems
    }

    /// Number of live systems
    #[must_use]
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// Whether the live set is empty (only before initialization)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Seed the initial set for a season
    ///
    /// Winter and fall start busier and stronger: 2-4 systems at intensity
    /// 0.5-1.0, otherwise 2-3 at 0.3-0.8. The first two are always one high
    /// and one low.
    pub fn initialize(&mut self, season: Season, rng: &mut impl Rng) {
        self.systems.clear();
        self.next_id = 0;

        let (count, intensity_range) = if season.is_stormy() {
            (rng.random_range(2..=4), 0.5..=1.0)
        } else {
            (rng.random_range(2..=3), 0.3..=0.8)
        };

        for i in 0..count {
            let kind = match i {
                0 => SystemKind::HighPressure,
                1 => SystemKind::LowPressure,
                _ if rng.random_bool(0.5) => SystemKind::HighPressure,
                _ => SystemKind::LowPressure,
            };
            let intensity = rng.random_range(intensity_range.clone());
            let position = rng.random_range(0.0..=1.0);
            let system = self.make_system(kind, intensity, position, None, false, rng);
            self.systems.push(system);
        }

        debug!(season = %season, count, "Seeded weather systems");
        self.enforce_minimum_systems(rng);
    }

    /// Advance the life cycle by `hours`
    ///
    /// Each hour: age and move every system, cull expired ones, maybe spawn
    /// a newcomer, then look for new fronts.
    pub fn update(&mut self, hours: u32, context: SystemContext, rng: &mut impl Rng) {
        for _ in 0..hours {
            for system in &mut self.systems {
                system.advance_hour();
            }

            let before = self.systems.len();
            self.systems.retain(|s| !s.is_expired());
            let removed = before - self.systems.len();
            if removed > 0 {
                debug!(removed, remaining = self.systems.len(), "Weather systems dissipated");
            }

            let spawn_chance = if context.storm_cooldown_active {
                SPAWN_CHANCE_AFTER_STORM
            } else {
                SPAWN_CHANCE
            };
            if rng.random_bool(spawn_chance) {
                self.spawn_system(rng);
            }

            self.check_for_front_generation(context.thunderstorm_active, rng);
            self.enforce_minimum_systems(rng);
        }
    }

    /// Form fronts between close high/low pairs that have none yet
    ///
    /// The front sits at the pair's midpoint; it is a cold front when the
    /// high is "behind" the low (higher position), warm otherwise. Returns
    /// the number of fronts created.
    pub fn check_for_front_generation(
        &mut self,
        thunderstorm_active: bool,
        rng: &mut impl Rng,
    ) -> usize {
        let mut pairs = Vec::new();
        for high in self.systems.iter().filter(|s| s.kind == SystemKind::HighPressure) {
            for low in self.systems.iter().filter(|s| s.kind == SystemKind::LowPressure) {
                if (high.position - low.position).abs() > FRONT_DISTANCE {
                    continue;
                }
                let linked = self
                    .systems
                    .iter()
                    .any(|s| s.kind.is_front() && s.has_parents(high.id, low.id));
                if !linked {
                    pairs.push((high.clone(), low.clone()));
                }
            }
        }

        let created = pairs.len();
        for (high, low) in pairs {
            let kind = if high.position > low.position {
                SystemKind::ColdFront
            } else {
                SystemKind::WarmFront
            };
            let intensity = (high.intensity + low.intensity) / 2.0;
            let position = (high.position + low.position) / 2.0;
            let front = self.make_system(
                kind,
                intensity,
                position,
                Some((high.id, low.id)),
                thunderstorm_active,
                rng,
            );
            debug!(
                id = %front.id,
                kind = %kind,
                high = %high.id,
                low = %low.id,
                max_age = front.max_age,
                "Front formed"
            );
            self.systems.push(front);
        }
        created
    }

    /// Restore the "never empty" invariant
    ///
    /// An empty set gets a fresh high/low pair; a lone survivor gets its
    /// opposite. Returns the number of systems added.
    pub fn enforce_minimum_systems(&mut self, rng: &mut impl Rng) -> usize {
        let kinds: Vec<SystemKind> = match self.systems.as_slice() {
            [] => vec![SystemKind::HighPressure, SystemKind::LowPressure],
            [only] => vec![only.kind.opposite()],
            _ => return 0,
        };

        warn!(
            live = self.systems.len(),
            added = kinds.len(),
            "Weather system set ran low, adding balancing systems"
        );
        for kind in &kinds {
            let intensity = rng.random_range(0.3..=0.7);
            let position = rng.random_range(0.2..=0.8);
            let system = self.make_system(*kind, intensity, position, None, false, rng);
            self.systems.push(system);
        }
        kinds.len()
    }

    fn spawn_system(&mut self, rng: &mut impl Rng) {
        let kind = if rng.random_bool(0.5) {
            SystemKind::HighPressure
        } else {
            SystemKind::LowPressure
        };
        let intensity = rng.random_range(0.3..=0.9);
        let mut system = self.make_system(kind, intensity, 0.0, None, false, rng);
        // Enter from the edge the system is moving away from
        system.position = if system.movement_direction > 0.0 { 0.0 } else { 1.0 };
        debug!(id = %system.id, kind = %kind, intensity, "Weather system moved in");
        self.systems.push(system);
    }

    fn make_system(
        &mut self,
        kind: SystemKind,
        intensity: f64,
        position: f64,
        parents: Option<(SystemId, SystemId)>,
        thunderstorm_active: bool,
        rng: &mut impl Rng,
    ) -> WeatherSystem {
        let id = SystemId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);

        let max_age = if kind.is_front() {
            let hours = f64::from(rng.random_range(24_u32..=48));
            let scale = if thunderstorm_active {
                rng.random_range(0.5..=0.6)
            } else {
                1.0
            };
            let scaled = (hours * scale).round() as u32;
            scaled.max(1)
        } else {
            rng.random_range(48..=120)
        };

        WeatherSystem {
            id,
            kind,
            intensity: intensity.clamp(0.0, 1.0),
            age: 0,
            position,
            movement_speed: rng.random_range(0.02..=0.05),
            movement_direction: if rng.random_bool(0.5) { 1.0 } else { -1.0 },
            max_age,
            parents,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn system(kind: SystemKind, id: u32, position: f64) -> WeatherSystem {
        WeatherSystem {
            id: SystemId(id),
            kind,
            intensity: 0.8,
            age: 0,
            position,
            movement_speed: 0.0,
            movement_direction: 1.0,
            max_age: 100,
            parents: None,
        }
    }

    fn service_with(systems: Vec<WeatherSystem>) -> WeatherSystemService {
        let next_id = systems.iter().map(|s| s.id.0 + 1).max().unwrap_or(0);
        WeatherSystemService { systems, next_id }
    }

    #[test]
    fn test_initialize_has_high_and_low() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut service = WeatherSystemService::new();
            service.initialize(Season::Summer, &mut rng);
            let kinds: Vec<_> = service.systems().iter().map(|s| s.kind).collect();
            assert!(kinds.contains(&SystemKind::HighPressure));
            assert!(kinds.contains(&SystemKind::LowPressure));
            assert!(service.len() <= 3);
        }
    }

    #[test]
    fn test_winter_is_stronger() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut service = WeatherSystemService::new();
        service.initialize(Season::Winter, &mut rng);
        assert!(service.systems().iter().all(|s| s.intensity >= 0.5));
    }

    #[test]
    fn test_centrality() {
        let center = system(SystemKind::HighPressure, 0, 0.5);
        let edge = system(SystemKind::HighPressure, 1, 1.0);
        assert!((center.centrality() - 1.0).abs() < 1e-12);
        assert!((edge.centrality() - 0.4).abs() < 1e-12);
        assert!(center.influence() > edge.influence());
    }

    #[test]
    fn test_front_forms_once_per_pair() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut service = service_with(vec![
            system(SystemKind::HighPressure, 0, 0.6),
            system(SystemKind::LowPressure, 1, 0.45),
        ]);

        assert_eq!(service.check_for_front_generation(false, &mut rng), 1);
        assert_eq!(service.check_for_front_generation(false, &mut rng), 0);

        let front = &service.systems()[2];
        assert_eq!(front.kind, SystemKind::ColdFront);
        assert!((front.position - 0.525).abs() < 1e-12);
        assert!(front.has_parents(SystemId(1), SystemId(0)));
        assert!((24..=48).contains(&front.max_age));
    }

    #[test]
    fn test_warm_front_and_distance_limit() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut service = service_with(vec![
            system(SystemKind::HighPressure, 0, 0.2),
            system(SystemKind::LowPressure, 1, 0.4),
            system(SystemKind::LowPressure, 2, 0.9),
        ]);
        assert_eq!(service.check_for_front_generation(false, &mut rng), 1);
        let front = service.systems().last().unwrap();
        assert_eq!(front.kind, SystemKind::WarmFront);
    }

    #[test]
    fn test_thunderstorm_shortens_fronts() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut service = service_with(vec![
            system(SystemKind::HighPressure, 0, 0.5),
            system(SystemKind::LowPressure, 1, 0.5),
        ]);
        service.check_for_front_generation(true, &mut rng);
        let front = service.systems().last().unwrap();
        assert!(front.max_age <= 29, "max_age {}", front.max_age);
    }

    #[test]
    fn test_intensity_decays_after_half_life() {
        let mut s = system(SystemKind::LowPressure, 0, 0.5);
        s.max_age = 10;
        for _ in 0..5 {
            s.advance_hour();
        }
        assert!((s.intensity - 0.8).abs() < 1e-12);
        s.advance_hour();
        assert!((s.intensity - 0.8 * DECAY_PER_HOUR).abs() < 1e-12);
    }

    #[test]
    fn test_update_removes_out_of_range_and_repairs() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut gone = system(SystemKind::HighPressure, 0, 1.19);
        gone.movement_speed = 0.05;
        let mut old = system(SystemKind::LowPressure, 1, 0.5);
        old.max_age = 1;
        let mut service = service_with(vec![gone, old]);

        service.update(1, SystemContext::default(), &mut rng);
        assert!(service.len() >= 2);
        assert!(service.systems().iter().all(|s| s.id.value() >= 2));
    }

    #[test]
    fn test_lone_front_gets_a_low() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut service = service_with(vec![system(SystemKind::WarmFront, 0, 0.5)]);
        assert_eq!(service.enforce_minimum_systems(&mut rng), 1);
        assert_eq!(service.systems()[1].kind, SystemKind::LowPressure);
        assert_eq!(service.enforce_minimum_systems(&mut rng), 0);
    }

    #[test]
    fn test_never_empty_over_long_run() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut service = WeatherSystemService::new();
        service.initialize(Season::Spring, &mut rng);
        let mut ids = Vec::new();
        for _ in 0..500 {
            service.update(1, SystemContext::default(), &mut rng);
            assert!(!service.is_empty());
            ids.extend(service.systems().iter().map(|s| s.id));
        }
        // identifiers are never reused
        let max = ids.iter().max().unwrap();
        assert!(max.value() as usize >= service.len());
    }
}
