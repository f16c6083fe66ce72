//! Per-frame animation passes, one per entity group.
//!
//! Each pass reads the scene mode and writes the current transform of its
//! entities. Nothing outside these passes writes entity state.

use glam::Vec3;

use super::TreeEngine;
use crate::animation::{cubic_in_out, damp, lerp_toward, lerp_vec3_toward};
use crate::options::AnimationOptions;
use crate::scene::{AnimatedEntity, EntityGroup, SceneMode};

/// Foliage brightness at the scattered end of the blend.
const FOLIAGE_DIM: f32 = 0.3;
/// Foliage brightness at the formed end of the blend.
const FOLIAGE_BRIGHT: f32 = 1.2;
/// Fairy light level while lit.
const LIGHT_ON: f32 = 2.0;
/// Fairy light level while dim.
const LIGHT_OFF: f32 = 0.5;

impl TreeEngine {
    /// Advance every animated group by `dt` seconds at scene time `time`.
    pub(super) fn animate(&mut self, dt: f32, time: f32) {
        let formed = self.scene.mode() == SceneMode::Formed;
        let anim = &self.options.animation;

        self.progress = damp(
            self.progress,
            if formed { 1.0 } else { 0.0 },
            anim.formation_time_constant,
            dt,
        );
        let theme = self.options.themes.get(self.scene.theme_index());
        self.foliage_color = lerp_vec3_toward(
            self.foliage_color,
            Vec3::from_array(theme.foliage),
            anim.foliage_color_rate,
            dt,
        );
        let blend = cubic_in_out(self.progress);

        animate_foliage(
            self.arena.group_mut(EntityGroup::Foliage),
            blend,
            self.foliage_color,
            time,
            anim.foliage_noise,
        );
        animate_ornaments(
            self.arena.group_mut(EntityGroup::Ornament),
            formed,
            anim,
            dt,
            time,
        );
        animate_decorations(
            self.arena.group_mut(EntityGroup::Decoration),
            formed,
            anim.decoration_lerp,
            dt,
        );
        animate_lights(
            self.arena.group_mut(EntityGroup::Light),
            formed,
            anim.light_lerp,
            dt,
            time,
        );
        animate_star(
            self.arena.group_mut(EntityGroup::Star),
            formed,
            anim.star_lerp,
            dt,
        );
        self.gallery.update(dt);
    }
}

/// Position of a foliage point at blend `t`. The formed end shimmers.
#[must_use]
fn foliage_position(
    origin: Vec3,
    target: Vec3,
    t: f32,
    time: f32,
    noise: f32,
) -> Vec3 {
    let shimmer = Vec3::new(
        (time * 1.5 + origin.x).sin(),
        (time + origin.y).cos(),
        (time * 1.5 + origin.z).sin(),
    ) * noise;
    origin.lerp(target + shimmer, t)
}

fn animate_foliage(
    entities: &mut [AnimatedEntity],
    t: f32,
    color: Vec3,
    time: f32,
    noise: f32,
) {
    let tint = color * (FOLIAGE_DIM + (FOLIAGE_BRIGHT - FOLIAGE_DIM) * t);
    for e in entities {
        e.set_position(foliage_position(e.origin(), e.target(), t, time, noise));
        e.set_color(tint);
    }
}

fn animate_ornaments(
    entities: &mut [AnimatedEntity],
    formed: bool,
    anim: &AnimationOptions,
    dt: f32,
    time: f32,
) {
    for e in entities {
        let target = if formed { e.target() } else { e.origin() };
        let position =
            lerp_vec3_toward(e.position(), target, anim.ornament_lerp, dt);
        e.set_position(position);

        let rotation = if formed {
            // Face the trunk, then sway.
            let yaw = (-position.x).atan2(-position.z);
            let wind_pitch =
                (time * e.speed() + e.phase()).sin() * anim.wind_pitch;
            let wind_roll =
                (time * e.speed() * 0.5 + e.phase()).cos() * anim.wind_roll;
            Vec3::new(wind_pitch, yaw, wind_roll)
        } else {
            let spin = e.spin();
            e.rotation() + Vec3::new(spin.x, spin.y, 0.0) * dt
        };
        e.set_rotation(rotation);
    }
}

fn animate_decorations(
    entities: &mut [AnimatedEntity],
    formed: bool,
    lerp: f32,
    dt: f32,
) {
    for e in entities {
        let target = if formed { e.target() } else { e.origin() };
        e.set_position(lerp_vec3_toward(e.position(), target, lerp, dt));
        e.set_rotation(e.rotation() + Vec3::X * dt);
    }
}

/// Blink level of a light with `seed` at `time`.
#[must_use]
fn light_intensity(seed: f32, time: f32) -> f32 {
    if (time * 3.0 + seed * 10.0).sin() > 0.0 {
        LIGHT_ON
    } else {
        LIGHT_OFF
    }
}

fn animate_lights(
    entities: &mut [AnimatedEntity],
    formed: bool,
    lerp: f32,
    dt: f32,
    time: f32,
) {
    for e in entities {
        let target = if formed { e.target() } else { e.origin() };
        e.set_position(lerp_vec3_toward(e.position(), target, lerp, dt));
        e.set_intensity(light_intensity(e.seed(), time));
    }
}

fn animate_star(entities: &mut [AnimatedEntity], formed: bool, lerp: f32, dt: f32) {
    let goal = if formed { 1.0 } else { 0.0 };
    for e in entities {
        e.set_scale(lerp_toward(e.scale(), goal * e.base_scale(), lerp, dt));
        e.set_rotation(e.rotation() + Vec3::Y * dt);
    }
}
