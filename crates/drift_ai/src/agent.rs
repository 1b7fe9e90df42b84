//! Kinematic agent: force accumulation, bounded integration and world wrap

use std::collections::VecDeque;

use drift_math::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{AgentConfig, WorldBounds};
use crate::error::Result;

/// Maximum number of past positions kept per agent
pub const TRAIL_CAPACITY: usize = 50;

/// Render tag, one per agent kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTag {
    Cyan,
    Green,
    Red,
    Blue,
}

/// Bounded FIFO of past positions
#[derive(Debug, Clone, Default)]
pub struct Trail {
    points: VecDeque<Vec2>,
}

impl Trail {
    pub fn new() -> Self {
        Self {
            points: VecDeque::with_capacity(TRAIL_CAPACITY + 1),
        }
    }

    /// Append a position, evicting the oldest beyond capacity
    pub fn push(&mut self, point: Vec2) {
        self.points.push_back(point);
        while self.points.len() > TRAIL_CAPACITY {
            self.points.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Vec2> + '_ {
        self.points.iter()
    }

    pub fn last(&self) -> Option<Vec2> {
        self.points.back().copied()
    }

    pub fn to_vec(&self) -> Vec<Vec2> {
        self.points.iter().copied().collect()
    }
}

/// Read-only state other agents observe during a tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AgentSnapshot {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
}

/// What a renderer reads per agent per tick
#[derive(Debug, Clone, Copy)]
pub struct AgentView<'a> {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    pub color: ColorTag,
    pub trail: &'a Trail,
}

impl AgentView<'_> {
    /// Heading in radians, or `None` when the agent is effectively at rest
    pub fn heading(&self) -> Option<f32> {
        if self.velocity.length() < 0.01 {
            None
        } else {
            Some(self.velocity.angle())
        }
    }
}

/// Point mass steered by accumulated forces
#[derive(Debug, Clone)]
pub struct Agent {
    pub position: Vec2,
    pub velocity: Vec2,
    acceleration: Vec2,
    max_speed: f32,
    max_force: f32,
    size: f32,
    color: ColorTag,
    trail: Trail,
}

impl Agent {
    /// Create an agent with an explicit initial velocity
    pub fn new(config: AgentConfig, position: Vec2, velocity: Vec2, color: ColorTag) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            position,
            velocity,
            acceleration: Vec2::ZERO,
            max_speed: config.max_speed,
            max_force: config.max_force,
            size: config.size,
            color,
            trail: Trail::new(),
        })
    }

    /// Create an agent with a random heading and a speed drawn from `[0, max_speed)`
    pub fn spawn<R: Rng + ?Sized>(
        config: AgentConfig,
        position: Vec2,
        color: ColorTag,
        rng: &mut R,
    ) -> Result<Self> {
        config.validate()?;
        let heading = rng.gen_range(-std::f32::consts::PI..std::f32::consts::PI);
        let speed = rng.gen_range(0.0..config.max_speed);
        let mut velocity = Vec2::from_angle(heading) * speed;
        if velocity.length() == 0.0 {
            let floor = 0.1f32.min(config.max_speed);
            let speed = if floor < config.max_speed {
                rng.gen_range(floor..config.max_speed)
            } else {
                config.max_speed
            };
            velocity = Vec2::X * speed;
        }
        Self::new(config, position, velocity, color)
    }

    #[inline]
    pub fn acceleration(&self) -> Vec2 {
        self.acceleration
    }

    #[inline]
    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    #[inline]
    pub fn max_force(&self) -> f32 {
        self.max_force
    }

    #[inline]
    pub fn size(&self) -> f32 {
        self.size
    }

    #[inline]
    pub fn color(&self) -> ColorTag {
        self.color
    }

    #[inline]
    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub fn snapshot(&self) -> AgentSnapshot {
        AgentSnapshot {
            position: self.position,
            velocity: self.velocity,
            size: self.size,
        }
    }

    pub fn view(&self) -> AgentView<'_> {
        AgentView {
            position: self.position,
            velocity: self.velocity,
            size: self.size,
            color: self.color,
            trail: &self.trail,
        }
    }

    /// Accumulate a force into this tick's acceleration
    #[inline]
    pub fn apply_force(&mut self, force: Vec2) {
        self.acceleration += force;
    }

    /// Drop any force accumulated this tick
    #[inline]
    pub fn clear_acceleration(&mut self) {
        self.acceleration = Vec2::ZERO;
    }

    /// Advance one tick: bounded velocity update, position update, trail append
    pub fn integrate(&mut self) {
        self.velocity = (self.velocity + self.acceleration).clamp_magnitude(self.max_speed);
        self.position += self.velocity;
        self.acceleration = Vec2::ZERO;
        self.trail.push(self.position);
    }

    /// Steering that turns the current velocity toward `target` at full speed.
    ///
    /// Pure: the result is returned, not applied.
    pub fn seek(&self, target: Vec2) -> Vec2 {
        self.steer_toward((target - self.position).normalize())
    }

    /// Steering directly away from `target` when it is closer than `radius`, else zero
    pub fn flee(&self, target: Vec2, radius: f32) -> Vec2 {
        if self.position.distance(target) < radius {
            self.steer_toward((self.position - target).normalize())
        } else {
            Vec2::ZERO
        }
    }

    /// `clamp(direction * max_speed - velocity, max_force)` for a unit (or zero) direction
    pub(crate) fn steer_toward(&self, direction: Vec2) -> Vec2 {
        (direction * self.max_speed - self.velocity).clamp_magnitude(self.max_force)
    }

    /// Toroidal wrap. Crossing an edge clears the trail so it never spans the world.
    pub fn wrap_boundaries(&mut self, width: f32, height: f32) {
        let mut wrapped = false;

        if self.position.x > width {
            self.position.x = 0.0;
            wrapped = true;
        } else if self.position.x < 0.0 {
            self.position.x = width;
            wrapped = true;
        }

        if self.position.y > height {
            self.position.y = 0.0;
            wrapped = true;
        } else if self.position.y < 0.0 {
            self.position.y = height;
            wrapped = true;
        }

        if wrapped {
            self.trail.clear();
        }
    }

    /// Wrap against validated world bounds
    #[inline]
    pub fn wrap(&mut self, bounds: &WorldBounds) {
        self.wrap_boundaries(bounds.width, bounds.height);
    }
}
