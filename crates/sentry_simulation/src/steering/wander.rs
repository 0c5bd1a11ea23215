//! Wander — случайный waypoint внутри арены, обновляется по таймауту

use bevy::prelude::*;
use rand::Rng;

use crate::components::{Kinematic, PlayField};
use crate::steering::seek;

/// Состояние wander для одного охранника
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wander {
    waypoint: Option<Vec2>,
    /// Секунд с последней смены waypoint
    elapsed: f32,
    timeout: f32,
}

impl Wander {
    pub fn new(timeout_secs: f32) -> Self {
        Self {
            waypoint: None,
            elapsed: 0.0,
            timeout: timeout_secs,
        }
    }

    pub fn waypoint(&self) -> Option<Vec2> {
        self.waypoint
    }

    /// Сбросить waypoint: следующий steer выберет новый
    pub fn abandon(&mut self) {
        self.waypoint = None;
        self.elapsed = 0.0;
    }

    /// Обновить waypoint (если истёк таймаут) и вернуть seek delta к нему
    pub fn steer<R: Rng + ?Sized>(
        &mut self,
        body: &Kinematic,
        field: &PlayField,
        dt: f32,
        max_turn: f32,
        rng: &mut R,
    ) -> f32 {
        self.elapsed += dt;

        let waypoint = match self.waypoint {
            Some(waypoint) if self.elapsed <= self.timeout => waypoint,
            _ => {
                let fresh = random_waypoint(field, body.radius, rng);
                self.waypoint = Some(fresh);
                self.elapsed = 0.0;
                fresh
            }
        };

        seek(body, waypoint, max_turn)
    }
}

/// Равномерно случайная точка внутри арены, сжатой на margin
///
/// Если арена меньше 2×margin — центр арены.
pub fn random_waypoint<R: Rng + ?Sized>(field: &PlayField, margin: f32, rng: &mut R) -> Vec2 {
    let Some(area) = field.inset(margin) else {
        return field.rect().center();
    };

    Vec2::new(
        sample_span(rng, area.min.x, area.max.x),
        sample_span(rng, area.min.y, area.max.y),
    )
}

fn sample_span<R: Rng + ?Sized>(rng: &mut R, low: f32, high: f32) -> f32 {
    if high > low {
        rng.gen_range(low..high)
    } else {
        low
    }
}
