//! Property-based testing strategies.

use glam::Vec3;
use proptest::prelude::*;

/// Any finite damage amount, including negative and absurdly large
/// values: the core clamps, it never rejects.
pub fn damage_amount() -> impl Strategy<Value = f32> {
    prop_oneof![
        -1000.0f32..1000.0,
        Just(0.0f32),
        Just(-0.0f32),
        Just(f32::MAX / 2.0),
    ]
}

/// A health value inside a `[0, max]` range for a given ceiling.
pub fn health_within(max: f32) -> impl Strategy<Value = f32> {
    0.0f32..=max
}

/// A finite position within a plausible arena.
pub fn arena_position() -> impl Strategy<Value = Vec3> {
    (-100.0f32..100.0, 0.0f32..20.0, -100.0f32..100.0)
        .prop_map(|(x, y, z)| Vec3::new(x, y, z))
}
