//! Integration tests for the composite environment.
//!
//! Each test wires a [`TimeKeeper`], a [`SparseGrid`], and a
//! [`CompositeEnvironment`] together the way the simulation does, and
//! observes diagnostics through a [`RecordingTracker`].

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use std::sync::Arc;

use envsim_types::{
    Cell, EnvironmentConfig, Hemisphere, LayerKind, LayerSpec, Season, SeasonStrategyKind,
    TransitionMode, WorldBounds,
};
use envsim_world::season::{HemisphericStrategy, SeasonStrategy};
use envsim_world::{
    CompositeEnvironment, NoopTracker, RecordingTracker, SparseGrid, TimeKeeper, WorldError,
};

fn bounds() -> WorldBounds {
    WorldBounds::new(40, 40)
}

fn default_environment(keeper: &TimeKeeper) -> (CompositeEnvironment, Arc<RecordingTracker>) {
    let recorder = Arc::new(RecordingTracker::new());
    let env = CompositeEnvironment::from_config(
        &EnvironmentConfig::default(),
        recorder.clone(),
        keeper,
        bounds(),
    )
    .unwrap();
    (env, recorder)
}

#[test]
fn update_reports_every_configured_layer() {
    for count in 1..=3 {
        let specs: Vec<LayerSpec> = ["temperature", "humidity", "luminosity"]
            .into_iter()
            .take(count)
            .map(LayerSpec::new)
            .collect();
        let keeper = TimeKeeper::with_ticks_per_year(360).unwrap();
        let mut env = CompositeEnvironment::new(
            &specs,
            Arc::new(NoopTracker),
            &keeper,
            bounds(),
            SeasonStrategyKind::Hemispheric,
            TransitionMode::Discretized,
        )
        .unwrap();
        let grid = SparseGrid::filled(bounds()).unwrap();

        let state = env.update(&keeper, &grid);
        assert_eq!(state.len(), count);
        for (kind, layer_state) in &state {
            let layer = env.layer(*kind).unwrap();
            assert_eq!(layer_state.seasonal_factor, layer.seasonal_factor());
            assert_eq!(layer_state.year_progress, keeper.year_progress());
        }
    }
}

#[test]
fn unconfigured_layer_reads_exactly_zero() {
    let keeper = TimeKeeper::with_ticks_per_year(360).unwrap();
    let config = EnvironmentConfig {
        layers: vec![LayerSpec::new("luminosity")],
        ..EnvironmentConfig::default()
    };
    let env =
        CompositeEnvironment::from_config(&config, Arc::new(NoopTracker), &keeper, bounds())
            .unwrap();
    assert_eq!(env.value_at(LayerKind::Temperature, Cell::new(1, 1)), 0.0);
    assert_eq!(env.value_at(LayerKind::Humidity, Cell::new(1, 1)), 0.0);
}

#[test]
fn north_pole_peaks_at_a_quarter_year() {
    let mut keeper = TimeKeeper::with_ticks_per_year(360).unwrap();
    let strategy =
        HemisphericStrategy::new(40, TransitionMode::Discretized, Arc::new(NoopTracker));
    // Row 0 has blend weight 1, so its factor is (sin(p * 2pi) + 1) / 2.
    let start = strategy.season_for_cell(20, 0, keeper.year_progress());
    assert!((start.continuous_seasonal_factor - 0.5).abs() < 1e-9);

    for _ in 0..90 {
        keeper.tick().unwrap();
    }
    assert_eq!(keeper.year_progress(), 0.25);
    let peak = strategy.season_for_cell(20, 0, keeper.year_progress());
    assert!((peak.continuous_seasonal_factor - 1.0).abs() < 1e-9);
    assert!(peak.continuous_seasonal_factor > start.continuous_seasonal_factor + 0.4);

    for _ in 0..90 {
        keeper.tick().unwrap();
    }
    assert_eq!(keeper.year_progress(), 0.5);
    let mid = strategy.season_for_cell(20, 0, keeper.year_progress());
    assert!((mid.continuous_seasonal_factor - 0.5).abs() < 1e-9);
}

#[test]
fn sparse_grid_rejects_out_of_bounds_writes() {
    let mut grid = SparseGrid::new(WorldBounds::new(10, 10)).unwrap();
    grid.set_cell(5, 5).unwrap();
    assert_eq!(grid.all_cells(), vec![Cell::new(5, 5)]);
    assert!(matches!(
        grid.set_cell(-1, 0),
        Err(WorldError::OutOfBounds { x: -1, y: 0, .. })
    ));
}

#[test]
fn global_uniform_environment_is_uniform() {
    let keeper = TimeKeeper::new(360, 200).unwrap();
    let config = EnvironmentConfig {
        season_strategy: "GLOBAL_UNIFORM".to_owned(),
        ..EnvironmentConfig::default()
    };
    let mut env =
        CompositeEnvironment::from_config(&config, Arc::new(NoopTracker), &keeper, bounds())
            .unwrap();
    let grid = SparseGrid::filled(bounds()).unwrap();
    env.update(&keeper, &grid);

    let light = env.value_at(LayerKind::Luminosity, Cell::new(0, 0));
    let humidity = env.value_at(LayerKind::Humidity, Cell::new(0, 0));
    for cell in grid.all_cells() {
        assert_eq!(env.value_at(LayerKind::Luminosity, cell), light);
        assert_eq!(env.value_at(LayerKind::Humidity, cell), humidity);
    }
    assert_eq!(
        env.season_manager().last_season(Hemisphere::Global),
        Some(Season::Summer)
    );
}

#[test]
fn unknown_names_fail_construction() {
    let keeper = TimeKeeper::with_ticks_per_year(360).unwrap();
    let bad_layer = EnvironmentConfig {
        layers: vec![LayerSpec::new("temperature"), LayerSpec::new("pressure")],
        ..EnvironmentConfig::default()
    };
    let bad_strategy = EnvironmentConfig {
        season_strategy: "TROPICAL".to_owned(),
        ..EnvironmentConfig::default()
    };
    for config in [bad_layer, bad_strategy] {
        let result =
            CompositeEnvironment::from_config(&config, Arc::new(NoopTracker), &keeper, bounds());
        assert!(matches!(result, Err(WorldError::Configuration { .. })));
    }
}

#[test]
fn year_of_updates_crosses_every_boundary() {
    let mut keeper = TimeKeeper::with_ticks_per_year(100).unwrap();
    let (mut env, recorder) = default_environment(&keeper);
    let grid = SparseGrid::filled(bounds()).unwrap();

    let mut transitions = Vec::new();
    for _ in 0..100 {
        keeper.tick().unwrap();
        env.update(&keeper, &grid);
        transitions.extend_from_slice(env.last_transitions());
    }

    // North: Winter -> Spring -> Summer -> Winter. South mirrors it.
    let northern: Vec<Season> = transitions
        .iter()
        .filter(|t| t.hemisphere == Hemisphere::Northern)
        .map(|t| t.to)
        .collect();
    assert_eq!(northern, vec![Season::Spring, Season::Summer, Season::Winter]);
    assert_eq!(recorder.count("season_boundary_crossed"), transitions.len());
    assert_eq!(recorder.count("environment_updated"), 100);
}

#[test]
fn field_values_follow_the_cached_factor() {
    let keeper = TimeKeeper::new(360, 90).unwrap();
    let (mut env, _) = default_environment(&keeper);
    let grid = SparseGrid::filled(bounds()).unwrap();
    let state = env.update(&keeper, &grid);

    let factor = state[&LayerKind::Luminosity].seasonal_factor;
    let light = env.value_at(LayerKind::Luminosity, Cell::new(3, 9));
    assert_eq!(light, factor.clamp(0.0, 1.0));

    let humidity = env.value_at(LayerKind::Humidity, Cell::new(0, 0));
    assert!((0.0..=1.0).contains(&humidity));

    // Temperature peaks on the fixed equator row.
    let equator = env.value_at(LayerKind::Temperature, Cell::new(0, 20));
    let pole = env.value_at(LayerKind::Temperature, Cell::new(0, 0));
    assert!((equator - pole - 5.0).abs() < 1e-9);
}
