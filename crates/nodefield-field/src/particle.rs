//! Individual particle state and motion.

use nodefield_core::RandomSource;

/// Largest absolute velocity component, in pixels per frame.
pub const MAX_SPEED: f64 = 0.15;

const MIN_RADIUS: f64 = 1.0;
const RADIUS_SPAN: f64 = 3.0;

/// A drifting point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Horizontal position in pixels.
    pub x: f64,
    /// Vertical position in pixels, growing downwards.
    pub y: f64,
    /// Disc radius, fixed at creation.
    pub radius: f64,
    /// Horizontal velocity per frame.
    pub vx: f64,
    /// Vertical velocity per frame.
    pub vy: f64,
}

impl Particle {
    pub fn new(x: f64, y: f64, radius: f64, vx: f64, vy: f64) -> Self {
        Self {
            x,
            y,
            radius,
            vx,
            vy,
        }
    }

    /// Spawn a particle at a uniformly random spot inside `width` x `height`.
    ///
    /// Draws five samples from `rng`, in the order x, y, radius, vx, vy.
    pub fn spawn<R: RandomSource + ?Sized>(width: f64, height: f64, rng: &mut R) -> Self {
        let x = rng.next_unit() * width;
        let y = rng.next_unit() * height;
        let radius = MIN_RADIUS + rng.next_unit() * RADIUS_SPAN;
        let vx = (rng.next_unit() - 0.5) * 2.0 * MAX_SPEED;
        let vy = (rng.next_unit() - 0.5) * 2.0 * MAX_SPEED;
        Self::new(x, y, radius, vx, vy)
    }

    /// Advance one frame and bounce off the edges.
    ///
    /// The velocity is applied first; a particle found outside the area has
    /// its velocity pointed back inside for the next frame. Position is never
    /// clamped, so it may sit up to one step past an edge until then.
    ///
    /// Unlike a plain sign flip, the new direction depends on which edge was
    /// crossed. The two agree for particles that stay near the area; after a
    /// shrink, a particle stranded far outside heads back in instead of
    /// flipping back and forth where it is.
    pub fn step(&mut self, width: f64, height: f64) {
        self.x += self.vx;
        self.y += self.vy;

        if self.x < 0.0 {
            self.vx = self.vx.abs();
        } else if self.x > width {
            self.vx = -self.vx.abs();
        }
        if self.y < 0.0 {
            self.vy = self.vy.abs();
        } else if self.y > height {
            self.vy = -self.vy.abs();
        }
    }

    /// Euclidean distance to another particle.
    pub fn distance(&self, other: &Particle) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Initialize `count` particles for the given dimensions.
pub fn init_particles<R: RandomSource + ?Sized>(
    width: f64,
    height: f64,
    count: usize,
    rng: &mut R,
) -> Vec<Particle> {
    (0..count)
        .map(|_| Particle::spawn(width, height, rng))
        .collect()
}

/// Advance every particle by one frame.
pub fn update(particles: &mut [Particle], width: f64, height: f64) {
    for particle in particles {
        particle.step(width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed list of samples, wrapping around.
    struct Samples {
        values: Vec<f64>,
        next: usize,
    }

    impl RandomSource for Samples {
        fn next_unit(&mut self) -> f64 {
            let v = self.values[self.next % self.values.len()];
            self.next += 1;
            v
        }
    }

    #[test]
    fn test_spawn_at_lower_extreme() {
        let mut rng = Samples {
            values: vec![0.0],
            next: 0,
        };
        let p = Particle::spawn(800.0, 600.0, &mut rng);
        assert_eq!(p, Particle::new(0.0, 0.0, 1.0, -0.15, -0.15));
    }

    #[test]
    fn test_spawn_consumes_samples_in_order() {
        let mut rng = Samples {
            values: vec![0.5, 0.25, 0.5, 1.0 - 1e-9, 0.5],
            next: 0,
        };
        let p = Particle::spawn(800.0, 600.0, &mut rng);
        assert_eq!(p.x, 400.0);
        assert_eq!(p.y, 150.0);
        assert_eq!(p.radius, 2.5);
        assert!(p.vx < MAX_SPEED && p.vx > 0.149);
        assert_eq!(p.vy, 0.0);
        assert_eq!(rng.next, 5);
    }

    #[test]
    fn test_step_moves_by_velocity() {
        let mut p = Particle::new(10.0, 20.0, 1.0, 0.1, -0.1);
        p.step(100.0, 100.0);
        assert!((p.x - 10.1).abs() < 1e-12);
        assert!((p.y - 19.9).abs() < 1e-12);
        assert_eq!((p.vx, p.vy), (0.1, -0.1));
    }

    #[test]
    fn test_step_reflects_at_right_edge() {
        let mut p = Particle::new(799.95, 300.0, 1.0, 0.3, 0.0);
        p.step(800.0, 600.0);
        assert!(p.vx < 0.0);
        assert_eq!(p.vx.abs(), 0.3);
        assert!(p.x <= 800.0 + 0.3);
    }

    #[test]
    fn test_step_reflects_at_top_edge() {
        let mut p = Particle::new(50.0, 0.05, 1.0, 0.0, -0.1);
        p.step(800.0, 600.0);
        assert!(p.y < 0.0);
        assert_eq!(p.vy, 0.1);
    }

    #[test]
    fn test_stranded_particle_drifts_back() {
        // Outside after a shrink, already heading inwards: keeps heading in.
        let mut p = Particle::new(900.0, 300.0, 1.0, -0.1, 0.0);
        for _ in 0..10 {
            p.step(800.0, 600.0);
            assert_eq!(p.vx, -0.1);
        }
        assert!(p.x < 900.0);
    }

    #[test]
    fn test_distance() {
        let a = Particle::new(0.0, 0.0, 1.0, 0.0, 0.0);
        let b = Particle::new(3.0, 4.0, 1.0, 0.0, 0.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(b.distance(&a), 5.0);
    }
}
