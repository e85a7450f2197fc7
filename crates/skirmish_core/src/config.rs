//! Match configuration.
//!
//! Tuning values and the spawn-point table are data, not code. They are
//! authored in RON and handed to each peer at match start; the core never
//! reads files itself.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::components::Transform;
use crate::error::{CoreError, Result};

/// Projectile tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileConfig {
    /// Damage applied on contact.
    pub damage: f32,
    /// Travel speed in units per second.
    pub speed: f32,
    /// Ticks until the owner retires the projectile.
    pub lifetime_ticks: u32,
    /// Contact radius against player avatars.
    pub hit_radius: f32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            damage: 20.0,
            speed: 30.0,
            lifetime_ticks: 60,
            hit_radius: 1.0,
        }
    }
}

/// Full tuning for one match.
///
/// Defaults: 100 health, 100 points per kill, 20-damage projectiles at
/// 30 units per second with a three second lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Health ceiling for every player.
    pub max_health: f32,
    /// Points awarded to the attacker for a kill.
    pub kill_score: u32,
    /// Minimum ticks between shots from one player.
    pub fire_cooldown_ticks: u32,
    /// Projectile tuning.
    pub projectile: ProjectileConfig,
    /// Player movement speed in units per second.
    pub move_speed: f32,
    /// Vertical impulse applied on a jump edge, units per second.
    pub jump_impulse: f32,
    /// Gravity acceleration, units per second squared (negative is down).
    pub gravity: f32,
    /// Fixed spawn-point pool, read-only at runtime.
    pub spawn_points: Vec<Transform>,
    /// Number of skin indices the master may assign.
    pub skin_count: u8,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            kill_score: 100,
            fire_cooldown_ticks: 2,
            projectile: ProjectileConfig::default(),
            move_speed: 5.0,
            jump_impulse: 5.0,
            gravity: -9.81,
            spawn_points: vec![
                Transform::from_yaw(Vec3::new(-10.0, 0.0, -10.0), 0.0),
                Transform::from_yaw(Vec3::new(10.0, 0.0, -10.0), std::f32::consts::FRAC_PI_2),
                Transform::from_yaw(Vec3::new(10.0, 0.0, 10.0), std::f32::consts::PI),
                Transform::from_yaw(Vec3::new(-10.0, 0.0, 10.0), -std::f32::consts::FRAC_PI_2),
            ],
            skin_count: 8,
        }
    }
}

impl MatchConfig {
    /// Parse a config from RON text.
    pub fn from_ron_str(text: &str) -> Result<Self> {
        let config: Self =
            ron::from_str(text).map_err(|err| CoreError::ConfigParse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate tuning values.
    ///
    /// An empty spawn pool is allowed (spawning degrades to the origin);
    /// nonsensical numeric tuning is not.
    pub fn validate(&self) -> Result<()> {
        if self.max_health <= 0.0 {
            return Err(CoreError::ConfigInvalid(format!(
                "max_health must be positive, got {}",
                self.max_health
            )));
        }
        if self.projectile.damage < 0.0 {
            return Err(CoreError::ConfigInvalid(format!(
                "projectile damage must be non-negative, got {}",
                self.projectile.damage
            )));
        }
        if self.projectile.speed <= 0.0 {
            return Err(CoreError::ConfigInvalid(format!(
                "projectile speed must be positive, got {}",
                self.projectile.speed
            )));
        }
        if self.projectile.hit_radius <= 0.0 {
            return Err(CoreError::ConfigInvalid(format!(
                "projectile hit_radius must be positive, got {}",
                self.projectile.hit_radius
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(MatchConfig::default().validate().is_ok());
    }

    #[test]
    fn ron_round_trip() {
        let config = MatchConfig::default();
        let text = ron::to_string(&config).expect("serialize");
        let parsed = MatchConfig::from_ron_str(&text).expect("parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn rejects_zero_health() {
        let mut config = MatchConfig::default();
        config.max_health = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_negative_projectile_damage() {
        let mut config = MatchConfig::default();
        config.projectile.damage = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn parse_error_is_reported() {
        let err = MatchConfig::from_ron_str("(not valid").unwrap_err();
        assert!(matches!(err, CoreError::ConfigParse(_)));
    }
}
