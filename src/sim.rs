use crate::model::{
    Particle, ShowParams, CENTER_X_BAND, CENTER_Y_BAND, GLYPHS, LIFE_RANGE, PALETTE,
    RADIUS_RANGE, SPAWN_MODULUS, SPEED_RANGE,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::f32::consts::TAU;

pub(crate) struct FireworkShow {
    params: ShowParams,
    particles: Vec<Particle>,
    frame_counter: u64,
    rng: StdRng,
}

impl FireworkShow {
    pub(crate) fn new(params: ShowParams, seed: u64) -> Self {
        Self {
            params,
            particles: Vec::with_capacity(params.sparks * 4),
            frame_counter: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub(crate) fn width(&self) -> usize {
        self.params.width
    }

    pub(crate) fn height(&self) -> usize {
        self.params.height
    }

    pub(crate) fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[cfg(test)]
    pub(crate) fn frame_counter(&self) -> u64 {
        self.frame_counter
    }

    /// Spark character for one particle in one frame.
    pub(crate) fn glyph(&mut self) -> char {
        GLYPHS[self.rng.gen_range(0..GLYPHS.len())]
    }

    /// Launch one explosion somewhere in the upper-middle of the canvas.
    pub(crate) fn spawn_firework(&mut self) {
        let w = self.params.width as f32;
        let h = self.params.height as f32;

        // Drawn to keep the random stream in step; it does not shape the burst.
        let _radius: f32 = self.rng.gen_range(RADIUS_RANGE);
        let x = uniform(&mut self.rng, CENTER_X_BAND.0 * w, CENTER_X_BAND.1 * w);
        let y = uniform(&mut self.rng, CENTER_Y_BAND.0 * h, CENTER_Y_BAND.1 * h);
        let hue_shift = self.rng.gen_range(0..PALETTE.len());

        self.particles.extend(explosion(
            &mut self.rng,
            self.params.sparks,
            x,
            y,
            hue_shift,
        ));
    }

    pub(crate) fn step(&mut self) {
        if self.particles.is_empty()
            || self.frame_counter % self.rng.gen_range(SPAWN_MODULUS) == 0
        {
            self.spawn_firework();
        }

        let ShowParams {
            width,
            height,
            gravity,
            damping,
            ..
        } = self.params;
        let (w, h) = (width as f32, height as f32);

        self.particles.retain_mut(|p| {
            p.advance(gravity, damping) && p.x >= 0.0 && p.x < w && p.y >= 0.0 && p.y < h
        });
        self.frame_counter += 1;
    }
}

/// Sparks of one burst, produced lazily. All share the origin; each gets its
/// own heading, speed, lifetime and a colour offset from `hue_shift`.
pub(crate) fn explosion(
    rng: &mut StdRng,
    sparks: usize,
    x: f32,
    y: f32,
    hue_shift: usize,
) -> impl Iterator<Item = Particle> + '_ {
    (0..sparks).map(move |_| {
        let angle = rng.gen_range(0.0..TAU);
        let speed = rng.gen_range(SPEED_RANGE);
        let life = rng.gen_range(LIFE_RANGE);
        let offset = rng.gen_range(0..PALETTE.len());
        Particle {
            x,
            y,
            vx: angle.cos() * speed,
            vy: angle.sin() * speed,
            life,
            colour: PALETTE[(hue_shift + offset) % PALETTE.len()],
        }
    })
}

// gen_range panics on an empty range, which a zero-sized canvas produces.
fn uniform(rng: &mut StdRng, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn small_show(sparks: usize, seed: u64) -> FireworkShow {
        let params = ShowParams {
            width: 10,
            height: 10,
            sparks,
            ..ShowParams::default()
        };
        FireworkShow::new(params, seed)
    }

    #[test]
    fn first_step_forces_a_spawn() {
        let mut show = small_show(5, 7);
        assert!(show.particles().is_empty());

        show.step();

        assert_eq!(show.particles().len(), 5);
        assert_eq!(show.frame_counter(), 1);
        for p in show.particles() {
            assert!(p.x >= 0.0 && p.x < 10.0, "x out of bounds: {}", p.x);
            assert!(p.y >= 0.0 && p.y < 10.0, "y out of bounds: {}", p.y);
            assert!(p.life <= 40);
        }
    }

    #[test]
    fn spawn_adds_exactly_one_burst() {
        let mut show = FireworkShow::new(ShowParams::with_size(100, 40), 99);
        show.spawn_firework();
        show.spawn_firework();
        assert_eq!(show.particles().len(), 240);

        for p in show.particles() {
            assert!(LIFE_RANGE.contains(&p.life));
            let speed = p.speed();
            assert!(speed >= 0.6 - 1e-4 && speed <= 1.6 + 1e-4, "speed {speed}");
            assert!(PALETTE.contains(&p.colour));
        }
    }

    #[test]
    fn burst_origin_is_in_the_upper_middle_band() {
        let mut show = FireworkShow::new(ShowParams::with_size(100, 40), 3);
        for _ in 0..20 {
            show.particles.clear();
            show.spawn_firework();
            let origin = show.particles()[0];
            assert!(origin.x >= 20.0 && origin.x <= 80.0);
            assert!(origin.y >= 8.0 && origin.y <= 18.0);
            assert!(show
                .particles()
                .iter()
                .all(|p| p.x == origin.x && p.y == origin.y));
        }
    }

    #[test]
    fn step_on_frame_zero_launches_another_burst() {
        let mut show = FireworkShow::new(ShowParams::with_size(200, 100), 17);
        show.spawn_firework();
        assert_eq!(show.particles().len(), 120);
        assert_eq!(show.frame_counter(), 0);

        // 0 is a multiple of every modulus, so a live show still spawns here
        show.step();

        assert_eq!(show.particles().len(), 240);
        assert_eq!(show.frame_counter(), 1);
    }

    #[test]
    fn bursts_keep_coming_while_sparks_are_live() {
        let params = ShowParams {
            width: 400,
            height: 200,
            sparks: 300,
            ..ShowParams::default()
        };
        let mut show = FireworkShow::new(params, 8);
        show.spawn_firework();

        let mut spawns_over_live_show = 0;
        for _ in 0..400 {
            let before = show.particles().len();
            show.step();
            // a burst adds more sparks than a single frame can cull
            if before > 0 && show.particles().len() > before {
                spawns_over_live_show += 1;
            }
        }
        assert!(
            spawns_over_live_show >= 3,
            "only {spawns_over_live_show} bursts launched over a live show"
        );
    }

    #[test]
    fn glyphs_come_from_the_spark_set() {
        let mut show = FireworkShow::new(ShowParams::default(), 4);
        for _ in 0..50 {
            assert!(GLYPHS.contains(&show.glyph()));
        }
    }

    #[test]
    fn explosion_yields_requested_count() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(explosion(&mut rng, 0, 1.0, 1.0, 0).count(), 0);
        assert_eq!(explosion(&mut rng, 33, 1.0, 1.0, 13).count(), 33);
    }

    #[test]
    fn step_keeps_every_particle_on_canvas() {
        let mut show = FireworkShow::new(ShowParams::with_size(40, 15), 2024);
        for _ in 0..300 {
            show.step();
            for p in show.particles() {
                assert!(p.x >= 0.0 && p.x < 40.0);
                assert!(p.y >= 0.0 && p.y < 15.0);
                assert!(p.life > 0);
            }
        }
        assert_eq!(show.frame_counter(), 300);
    }

    #[test]
    fn same_seed_same_simulation() {
        let mut a = FireworkShow::new(ShowParams::with_size(60, 20), 42);
        let mut b = FireworkShow::new(ShowParams::with_size(60, 20), 42);
        for _ in 0..50 {
            a.step();
            b.step();
        }
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn degenerate_canvas_does_not_panic() {
        let mut show = FireworkShow::new(ShowParams::with_size(1, 1), 5);
        for _ in 0..10 {
            show.step();
        }
        assert!(show.particles().iter().all(|p| p.x < 1.0 && p.y < 1.0));
    }
}
