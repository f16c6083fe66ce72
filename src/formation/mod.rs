//! Procedural endpoint layouts for every animated group.
//!
//! Each group has a *scattered* layout (a uniform cloud) and a *target*
//! layout (the tree). Both are drawn once at scene construction from a
//! caller-supplied RNG, so a seeded [`rand::rngs::StdRng`] reproduces a
//! scene exactly.
//!
//! The tree is a cone of height `h` and base radius `r0`: at normalized
//! height `y ∈ [0, 1]` the allowed radius is `r0 · (1 − y)`.

pub mod ring;

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

use crate::options::FormationOptions;

// ---------------------------------------------------------------------------
// Shapes
// ---------------------------------------------------------------------------

/// Volume a group scatters into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScatterShape {
    /// Uniform inside a ball centred on the origin.
    Ball {
        /// Ball radius.
        radius: f32,
    },
    /// Uniform inside an axis-aligned cube centred on the origin.
    Cube {
        /// Edge length.
        extent: f32,
    },
    /// Uniform on a sphere surface centred on the origin.
    Shell {
        /// Sphere radius.
        radius: f32,
    },
}

/// Volume a group gathers into when the tree forms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TargetShape {
    /// Anywhere inside the tapered cone.
    Cone {
        /// Cone height, centred on y = 0.
        height: f32,
        /// Radius at the base.
        base_radius: f32,
    },
    /// On the cone surface pushed outward by a fixed offset.
    ConeSurface {
        /// Cone height, centred on y = 0.
        height: f32,
        /// Radius at the base.
        base_radius: f32,
        /// Extra radius added at every height.
        offset: f32,
    },
    /// Anywhere inside an upright cylinder.
    Cylinder {
        /// Cylinder radius.
        radius: f32,
        /// Cylinder height, centred on y = 0.
        height: f32,
    },
}

/// The formation classes the scene builds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormationKind {
    /// Tree body points.
    Foliage,
    /// Photo ornaments on the tree surface.
    Ornament,
    /// Box decorations.
    Decoration,
    /// Fairy lights.
    Light,
}

impl FormationKind {
    /// Scatter and target shapes for this kind under `opts`.
    #[must_use]
    pub fn shapes(self, opts: &FormationOptions) -> (ScatterShape, TargetShape) {
        let cone = TargetShape::Cone {
            height: opts.tree_height,
            base_radius: opts.tree_base_radius,
        };
        match self {
            Self::Foliage => (
                ScatterShape::Ball {
                    radius: opts.foliage_scatter_radius,
                },
                cone,
            ),
            Self::Ornament => (
                ScatterShape::Cube {
                    extent: opts.ornament_scatter_extent,
                },
                TargetShape::ConeSurface {
                    height: opts.tree_height,
                    base_radius: opts.tree_base_radius,
                    offset: opts.ornament_offset,
                },
            ),
            Self::Decoration => (
                ScatterShape::Cube {
                    extent: opts.decoration_scatter_extent,
                },
                TargetShape::Cylinder {
                    radius: opts.decoration_radius,
                    height: opts.decoration_height,
                },
            ),
            Self::Light => (
                ScatterShape::Shell {
                    radius: opts.light_scatter_radius,
                },
                TargetShape::Cylinder {
                    radius: opts.light_radius,
                    height: opts.light_height,
                },
            ),
        }
    }

    /// Entity count for this kind under `opts`.
    #[must_use]
    pub fn count(self, opts: &FormationOptions) -> usize {
        match self {
            Self::Foliage => opts.foliage_count,
            Self::Ornament => opts.ornament_count,
            Self::Decoration => opts.decoration_count,
            Self::Light => opts.light_count,
        }
    }
}

// ---------------------------------------------------------------------------
// Formation
// ---------------------------------------------------------------------------

/// Equal-length scattered and target layouts plus a per-entity jitter
/// scalar in `[0, 1)`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Formation {
    /// Scattered positions.
    pub scattered: Vec<Vec3>,
    /// Formed positions.
    pub target: Vec<Vec3>,
    /// Per-entity random scalar for timing jitter.
    pub jitter: Vec<f32>,
}

impl Formation {
    /// Draw `count` independent entities.
    pub fn generate<R: Rng + ?Sized>(
        count: usize,
        scatter: ScatterShape,
        target: TargetShape,
        rng: &mut R,
    ) -> Self {
        let mut formation = Self {
            scattered: Vec::with_capacity(count),
            target: Vec::with_capacity(count),
            jitter: Vec::with_capacity(count),
        };
        for _ in 0..count {
            formation.scattered.push(scatter.sample(rng));
            formation.target.push(target.sample(rng));
            formation.jitter.push(rng.random::<f32>());
        }
        formation
    }

    /// Draw the layout of one formation kind.
    pub fn for_kind<R: Rng + ?Sized>(
        kind: FormationKind,
        opts: &FormationOptions,
        rng: &mut R,
    ) -> Self {
        let (scatter, target) = kind.shapes(opts);
        Self::generate(kind.count(opts), scatter, target, rng)
    }

    /// Number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scattered.len()
    }

    /// Whether the formation is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scattered.is_empty()
    }
}

impl ScatterShape {
    /// One uniform sample.
    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> Vec3 {
        match self {
            Self::Ball { radius } => unit_ball(rng) * radius,
            Self::Cube { extent } => {
                Vec3::new(
                    rng.random::<f32>() - 0.5,
                    rng.random::<f32>() - 0.5,
                    rng.random::<f32>() - 0.5,
                ) * extent
            }
            Self::Shell { radius } => unit_direction(rng) * radius,
        }
    }
}

impl TargetShape {
    /// One sample.
    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> Vec3 {
        match self {
            Self::Cone {
                height,
                base_radius,
            } => {
                let (y, allowed) = cone_slice(height, base_radius, rng);
                let r = rng.random::<f32>() * allowed;
                polar(r, rng.random::<f32>() * TAU, y)
            }
            Self::ConeSurface {
                height,
                base_radius,
                offset,
            } => {
                let (y, allowed) = cone_slice(height, base_radius, rng);
                polar(allowed + offset, rng.random::<f32>() * TAU, y)
            }
            Self::Cylinder { radius, height } => {
                let r = rng.random::<f32>() * radius;
                let y = rng.random::<f32>() * height - height / 2.0;
                polar(r, rng.random::<f32>() * TAU, y)
            }
        }
    }
}

/// Allowed radius at world height `y` of a cone centred on y = 0.
#[must_use]
pub fn cone_radius_at(y: f32, height: f32, base_radius: f32) -> f32 {
    let normalized = ((y + height / 2.0) / height).clamp(0.0, 1.0);
    base_radius * (1.0 - normalized)
}

fn cone_slice<R: Rng + ?Sized>(
    height: f32,
    base_radius: f32,
    rng: &mut R,
) -> (f32, f32) {
    let normalized = rng.random::<f32>();
    let y = normalized * height - height / 2.0;
    (y, base_radius * (1.0 - normalized))
}

fn polar(r: f32, theta: f32, y: f32) -> Vec3 {
    Vec3::new(r * theta.cos(), y, r * theta.sin())
}

fn unit_ball<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let p = Vec3::new(
            rng.random_range(-1.0..=1.0),
            rng.random_range(-1.0..=1.0),
            rng.random_range(-1.0..=1.0),
        );
        if p.length_squared() <= 1.0 {
            return p;
        }
    }
}

fn unit_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let p = unit_ball(rng);
        let len_sq = p.length_squared();
        if len_sq > 1e-6 {
            return p / len_sq.sqrt();
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x7EE5)
    }

    #[test]
    fn counts_match_and_points_are_finite() {
        let mut rng = rng();
        let opts = FormationOptions::default();
        for n in [0, 1, 7, 500] {
            let (scatter, target) = FormationKind::Foliage.shapes(&opts);
            let f = Formation::generate(n, scatter, target, &mut rng);
            assert_eq!(f.scattered.len(), n);
            assert_eq!(f.target.len(), n);
            assert_eq!(f.jitter.len(), n);
            assert!(f.scattered.iter().chain(&f.target).all(|p| p.is_finite()));
            assert!(f.jitter.iter().all(|j| (0.0..1.0).contains(j)));
        }
    }

    #[test]
    fn tree_points_respect_cone_taper() {
        let mut rng = rng();
        let shape = TargetShape::Cone {
            height: 22.0,
            base_radius: 9.0,
        };
        for _ in 0..5000 {
            let p = shape.sample(&mut rng);
            let radius = Vec3::new(p.x, 0.0, p.z).length();
            let normalized = (p.y + 11.0) / 22.0;
            assert!((0.0..=1.0).contains(&normalized));
            assert!(radius <= 9.0 * (1.0 - normalized) + 1e-4);
        }
    }

    #[test]
    fn ornaments_sit_on_offset_surface() {
        let mut rng = rng();
        let shape = TargetShape::ConeSurface {
            height: 22.0,
            base_radius: 9.0,
            offset: 0.5,
        };
        for _ in 0..1000 {
            let p = shape.sample(&mut rng);
            let radius = Vec3::new(p.x, 0.0, p.z).length();
            let expected = cone_radius_at(p.y, 22.0, 9.0) + 0.5;
            assert!((radius - expected).abs() < 1e-3);
            assert!(radius >= 0.5 - 1e-4);
        }
    }

    #[test]
    fn cylinder_is_bounded() {
        let mut rng = rng();
        let shape = TargetShape::Cylinder {
            radius: 9.0,
            height: 22.0,
        };
        for _ in 0..2000 {
            let p = shape.sample(&mut rng);
            assert!(Vec3::new(p.x, 0.0, p.z).length() <= 9.0 + 1e-4);
            assert!(p.y.abs() <= 11.0 + 1e-4);
        }
    }

    #[test]
    fn scatter_shapes_stay_in_bounds() {
        let mut rng = rng();
        for _ in 0..2000 {
            assert!(ScatterShape::Ball { radius: 25.0 }.sample(&mut rng).length() <= 25.0 + 1e-3);
            let shell = ScatterShape::Shell { radius: 30.0 }.sample(&mut rng);
            assert!((shell.length() - 30.0).abs() < 1e-3);
            let cube = ScatterShape::Cube { extent: 70.0 }.sample(&mut rng);
            assert!(cube.abs().max_element() <= 35.0);
        }
    }

    #[test]
    fn ball_density_is_volumetric() {
        // Half the radius encloses 0.5³ of the volume.
        let mut rng = rng();
        let n = 20_000;
        let inner = (0..n)
            .filter(|_| ScatterShape::Ball { radius: 1.0 }.sample(&mut rng).length() < 0.5)
            .count();
        let ratio = inner as f32 / n as f32;
        assert!((ratio - 0.125).abs() < 0.015, "ratio {ratio}");
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let opts = FormationOptions::default();
        let a = Formation::for_kind(FormationKind::Light, &opts, &mut rng());
        let b = Formation::for_kind(FormationKind::Light, &opts, &mut rng());
        assert_eq!(a, b);
        assert_eq!(a.len(), opts.light_count);
    }

    #[test]
    fn cone_radius_tapers_to_tip() {
        assert!((cone_radius_at(-11.0, 22.0, 9.0) - 9.0).abs() < 1e-6);
        assert!(cone_radius_at(11.0, 22.0, 9.0).abs() < 1e-6);
        assert!((cone_radius_at(0.0, 22.0, 9.0) - 4.5).abs() < 1e-6);
    }
}
