//! Shared type definitions for the envsim workspace.
//!
//! This crate is the single source of truth for the values that cross crate
//! boundaries and reach the front-end. Types flow downstream to `TypeScript`
//! via `ts-rs` so the renderer and dashboards read the same shapes the
//! simulation produces.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for events and sessions
//! - [`enums`] -- Seasons, hemispheres, layer kinds, configuration selectors
//! - [`structs`] -- Cells, bounds, seasonal descriptors, layer snapshots
//! - [`settings`] -- Environment configuration shapes (layer specs, params)

pub mod enums;
pub mod ids;
pub mod settings;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{
    EventType, Hemisphere, LayerKind, Season, SeasonStrategyKind, TransitionMode, UnknownName,
};
pub use ids::{EventId, SessionId};
pub use settings::{EnvironmentConfig, LayerParams, LayerSpec};
pub use structs::{
    Cell, EnvironmentState, LayerState, SeasonTransition, SeasonalData, TrackedEvent, WorldBounds,
};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // ts-rs generates TypeScript bindings when types with
        // #[ts(export)] are used. The files are written to the `bindings/`
        // directory relative to the crate root.
        use ts_rs::TS;

        // IDs
        let _ = crate::ids::EventId::export_all();
        let _ = crate::ids::SessionId::export_all();

        // Enums
        let _ = crate::enums::Season::export_all();
        let _ = crate::enums::Hemisphere::export_all();
        let _ = crate::enums::LayerKind::export_all();
        let _ = crate::enums::SeasonStrategyKind::export_all();
        let _ = crate::enums::TransitionMode::export_all();
        let _ = crate::enums::EventType::export_all();

        // Structs
        let _ = crate::structs::Cell::export_all();
        let _ = crate::structs::WorldBounds::export_all();
        let _ = crate::structs::SeasonalData::export_all();
        let _ = crate::structs::SeasonTransition::export_all();
        let _ = crate::structs::LayerState::export_all();
        let _ = crate::structs::TrackedEvent::export_all();

        // Settings
        let _ = crate::settings::LayerParams::export_all();
        let _ = crate::settings::LayerSpec::export_all();
        let _ = crate::settings::EnvironmentConfig::export_all();
    }
}
