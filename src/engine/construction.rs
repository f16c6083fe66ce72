//! Scene population: one pass over every formation kind at startup.

use glam::{Vec2, Vec3};
use rand::Rng;

use crate::formation::{Formation, FormationKind};
use crate::options::FormationOptions;
use crate::scene::{AnimatedEntity, EntityArena, EntityGroup, PhotoLibrary};
use crate::util::color::hex_vec3;

/// Photo frame tint.
const FRAME_COLOR: u32 = 0xFF_FA_F0;
/// Decoration box colors: red and gold.
const DECORATION_COLORS: [u32; 2] = [0xD3_2F_2F, 0xFF_D7_00];
/// Fairy light colors.
const LIGHT_COLORS: [u32; 4] = [0xFF_00_00, 0x00_FF_00, 0x00_00_FF, 0xFF_FF_00];
/// Star color.
const STAR_COLOR: u32 = 0xFF_D7_00;

/// Build every animated group.
pub(super) fn populate<R: Rng + ?Sized>(
    opts: &FormationOptions,
    photos: &PhotoLibrary,
    rng: &mut R,
) -> EntityArena {
    let mut arena = EntityArena::new();

    let foliage = Formation::for_kind(FormationKind::Foliage, opts, rng);
    let _ = arena.push_group(
        EntityGroup::Foliage,
        entities(EntityGroup::Foliage, &foliage)
            .map(|e| {
                let size = 1.0 + e.seed();
                e.with_scale(size)
            })
            .collect(),
    );

    let ornaments = Formation::for_kind(FormationKind::Ornament, opts, rng);
    let _ = arena.push_group(
        EntityGroup::Ornament,
        entities(EntityGroup::Ornament, &ornaments)
            .enumerate()
            .map(|(i, e)| {
                let phase = rng.random::<f32>() * 100.0;
                let speed = 0.5 + rng.random::<f32>();
                let spin = Vec2::new(
                    rng.random::<f32>() - 0.5,
                    rng.random::<f32>() - 0.5,
                );
                e.with_color(hex_vec3(FRAME_COLOR))
                    .with_motion(phase, speed, spin)
                    .with_image(i % photos.len())
            })
            .collect(),
    );

    let decorations = Formation::for_kind(FormationKind::Decoration, opts, rng);
    let _ = arena.push_group(
        EntityGroup::Decoration,
        entities(EntityGroup::Decoration, &decorations)
            .map(|e| {
                let color = if rng.random::<f32>() > 0.5 {
                    DECORATION_COLORS[0]
                } else {
                    DECORATION_COLORS[1]
                };
                let scale = 0.5 + rng.random::<f32>() * 0.5;
                e.with_color(hex_vec3(color)).with_scale(scale)
            })
            .collect(),
    );

    let lights = Formation::for_kind(FormationKind::Light, opts, rng);
    let _ = arena.push_group(
        EntityGroup::Light,
        entities(EntityGroup::Light, &lights)
            .map(|e| {
                let color = LIGHT_COLORS[rng.random_range(0..LIGHT_COLORS.len())];
                e.with_color(hex_vec3(color))
            })
            .collect(),
    );

    let top = Vec3::new(0.0, opts.star_height, 0.0);
    let _ = arena.push_group(
        EntityGroup::Star,
        vec![AnimatedEntity::new(EntityGroup::Star, top, top, 0.0)
            .with_color(hex_vec3(STAR_COLOR))
            .with_initial_scale(0.0)],
    );

    log::info!(
        "scene populated: {} foliage, {} ornaments, {} decorations, {} lights",
        foliage.len(),
        ornaments.len(),
        decorations.len(),
        lights.len()
    );
    arena
}

fn entities(
    group: EntityGroup,
    formation: &Formation,
) -> impl Iterator<Item = AnimatedEntity> + '_ {
    formation
        .scattered
        .iter()
        .zip(&formation.target)
        .zip(&formation.jitter)
        .map(move |((&origin, &target), &seed)| {
            AnimatedEntity::new(group, origin, target, seed)
        })
}
