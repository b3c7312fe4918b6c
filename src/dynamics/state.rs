use nalgebra::Vector2;

// ---------------------------------------------------------------------------
// Physical constants
// ---------------------------------------------------------------------------

pub const G: f64 = 9.81; // gravity, m/s^2 (flat earth, constant)

// ---------------------------------------------------------------------------
// Planar kinematic state: horizontal range x, altitude y
// ---------------------------------------------------------------------------

/// Point-mass state in the firing plane.
/// Frame: x downrange, y up, origin at the muzzle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicState {
    pub pos: Vector2<f64>, // m   [x, y]
    pub vel: Vector2<f64>, // m/s [vx, vy]
}

impl KinematicState {
    /// Muzzle state for a given launch elevation (degrees) and speed.
    pub fn at_muzzle(launch_angle_deg: f64, muzzle_velocity: f64) -> Self {
        let theta = launch_angle_deg.to_radians();
        Self {
            pos: Vector2::zeros(),
            vel: Vector2::new(muzzle_velocity * theta.cos(), muzzle_velocity * theta.sin()),
        }
    }

    /// Advance state by a derivative scaled by dt (used inside RK4).
    pub fn apply(&self, d: &Deriv, dt: f64) -> KinematicState {
        KinematicState {
            pos: self.pos + d.dpos * dt,
            vel: self.vel + d.dvel * dt,
        }
    }

    pub fn x(&self) -> f64 {
        self.pos.x
    }

    pub fn y(&self) -> f64 {
        self.pos.y
    }

    pub fn speed(&self) -> f64 {
        self.vel.norm()
    }

    /// Angle of the velocity vector below the horizontal, degrees.
    /// Positive while descending.
    pub fn descent_angle_deg(&self) -> f64 {
        (-self.vel.y).atan2(self.vel.x).to_degrees()
    }
}

// ---------------------------------------------------------------------------
// State derivative (dp/dt, dv/dt)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct Deriv {
    pub dpos: Vector2<f64>, // velocity
    pub dvel: Vector2<f64>, // acceleration
}
