use std::f32::consts::TAU;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const FOV_Y_DEGREES: f32 = 75.0;
const NEAR_PLANE: f32 = 0.1;
const MIN_SPRITE_PX: f32 = 1.0;

/// A fixed set of points sampled once, uniformly, inside a cube of side `extent`
/// centred on the origin. Positions never change after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleField {
    positions: Vec<[f32; 3]>,
    extent: f32,
}

impl ParticleField {
    pub fn generate<R: Rng + ?Sized>(count: usize, extent: f32, rng: &mut R) -> Self {
        let extent = extent.abs();
        let mut coord = || (rng.gen::<f32>() - 0.5) * extent;
        let positions = (0..count).map(|_| [coord(), coord(), coord()]).collect();
        Self { positions, extent }
    }

    /// Fresh, unseeded sample. Two calls never share a sample.
    pub fn random(count: usize, extent: f32) -> Self {
        Self::generate(count, extent, &mut rand::thread_rng())
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn extent(&self) -> f32 {
        self.extent
    }
}

/// Euler angles in radians, applied in XYZ order.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rotation {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl Rotation {
    pub const ZERO: Rotation = Rotation {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn scaled(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            z: self.z * factor,
        }
    }

    pub fn wrapped(self) -> Self {
        Self {
            x: self.x.rem_euclid(TAU),
            y: self.y.rem_euclid(TAU),
            z: self.z.rem_euclid(TAU),
        }
    }

    pub fn lerp(self, target: Rotation, factor: f32) -> Self {
        Self {
            x: self.x + (target.x - self.x) * factor,
            y: self.y + (target.y - self.y) * factor,
            z: self.z + (target.z - self.z) * factor,
        }
    }

    /// Rotates a point the way a scene graph applies an XYZ euler: z first, x last.
    pub fn apply(&self, [x, y, z]: [f32; 3]) -> [f32; 3] {
        let (sz, cz) = self.z.sin_cos();
        let (x, y) = (x * cz - y * sz, x * sz + y * cz);
        let (sy, cy) = self.y.sin_cos();
        let (x, z) = (x * cy + z * sy, -x * sy + z * cy);
        let (sx, cx) = self.x.sin_cos();
        let (y, z) = (y * cx - z * sx, y * sx + z * cx);
        [x, y, z]
    }
}

/// Pointer position in normalized device coordinates: (0, 0) is the viewport
/// centre, x grows to the right and y grows upwards, both in [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerOffset {
    pub x: f32,
    pub y: f32,
}

impl PointerOffset {
    pub fn from_client(client_x: f64, client_y: f64, width: f64, height: f64) -> Self {
        if width <= 0.0 || height <= 0.0 {
            return Self::default();
        }
        let x = (client_x / width) * 2.0 - 1.0;
        let y = -((client_y / height) * 2.0 - 1.0);
        Self {
            x: (x as f32).clamp(-1.0, 1.0),
            y: (y as f32).clamp(-1.0, 1.0),
        }
    }
}

/// How a background's aggregate orientation evolves with time and pointer input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Motion {
    /// `rotation = t * rates`
    TimeDriven { rates: Rotation },
    /// Like `TimeDriven`, with y offset by `pointer.x * gain` and x drifting by
    /// `pointer.y * gain` every frame.
    PointerDrift { rates: Rotation, pointer_gain: f32 },
    /// Eases the current rotation toward the pointer-perturbed target by `blend`
    /// per frame.
    Smoothed {
        rates: Rotation,
        pointer_gain: f32,
        blend: f32,
    },
}

impl Motion {
    pub fn rates(&self) -> Rotation {
        match *self {
            Motion::TimeDriven { rates }
            | Motion::PointerDrift { rates, .. }
            | Motion::Smoothed { rates, .. } => rates,
        }
    }

    /// Instantaneous target at `elapsed` seconds, before drift or smoothing.
    pub fn target(&self, elapsed: f32, pointer: PointerOffset) -> Rotation {
        let base = self.rates().scaled(elapsed);
        match *self {
            Motion::TimeDriven { .. } => base,
            Motion::PointerDrift { pointer_gain, .. } => Rotation {
                y: base.y + pointer.x * pointer_gain,
                ..base
            },
            Motion::Smoothed { pointer_gain, .. } => Rotation {
                x: base.x + pointer.y * pointer_gain,
                y: base.y + pointer.x * pointer_gain,
                ..base
            },
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColorError {
    #[error("color must start with '#': {0}")]
    MissingHash(String),
    #[error("invalid hex color: {0}")]
    InvalidHex(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    pub fn css(&self, alpha: f32) -> String {
        format!("rgba({}, {}, {}, {:.3})", self.r, self.g, self.b, alpha)
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| ColorError::MissingHash(s.to_string()))?;
        let invalid = || ColorError::InvalidHex(s.to_string());
        let channel = |c: &str| u8::from_str_radix(c, 16).map_err(|_| invalid());
        match hex.len() {
            6 if hex.is_ascii() => Ok(Self {
                r: channel(&hex[0..2])?,
                g: channel(&hex[2..4])?,
                b: channel(&hex[4..6])?,
            }),
            // #rgb shorthand, each digit doubled
            3 if hex.is_ascii() => Ok(Self {
                r: channel(&hex[0..1])? * 17,
                g: channel(&hex[1..2])? * 17,
                b: channel(&hex[2..3])? * 17,
            }),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        format!("#{:02x}{:02x}{:02x}", value.r, value.g, value.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Blending {
    #[default]
    Normal,
    Additive,
}

impl Blending {
    pub fn composite_operation(&self) -> &'static str {
        match self {
            Blending::Normal => "source-over",
            Blending::Additive => "lighter",
        }
    }
}

fn enabled() -> bool {
    true
}

/// Appearance of every point in a layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointMaterial {
    #[serde(default = "enabled")]
    pub transparent: bool,
    pub color: Rgb,
    pub point_size: f32,
    #[serde(default = "enabled")]
    pub size_attenuation: bool,
    #[serde(default)]
    pub depth_write: bool,
    pub opacity: f32,
    #[serde(default)]
    pub blending: Blending,
}

impl Default for PointMaterial {
    fn default() -> Self {
        Self {
            transparent: true,
            color: Rgb::WHITE,
            point_size: 0.003,
            size_attenuation: true,
            depth_write: false,
            opacity: 1.0,
            blending: Blending::Normal,
        }
    }
}

impl PointMaterial {
    pub fn effective_opacity(&self) -> f32 {
        if self.transparent {
            self.opacity.clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerConfig {
    pub count: usize,
    pub extent: f32,
    pub material: PointMaterial,
}

/// One decorative background: a group of layers sharing a camera and a motion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundConfig {
    pub camera_z: f32,
    pub motion: Motion,
    pub layers: Vec<LayerConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub z: f32,
    pub fov_y: f32,
    pub near: f32,
}

impl Camera {
    pub fn at(z: f32) -> Self {
        Self {
            z,
            fov_y: FOV_Y_DEGREES.to_radians(),
            near: NEAR_PLANE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

/// A projected point, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub depth: f32,
}

pub fn project(
    point: [f32; 3],
    rotation: &Rotation,
    camera: &Camera,
    viewport: &Viewport,
    material: &PointMaterial,
) -> Option<Sprite> {
    if viewport.width <= 0.0 || viewport.height <= 0.0 {
        return None;
    }
    let [x, y, z] = rotation.apply(point);
    let depth = camera.z - z;
    if depth < camera.near {
        return None;
    }
    let focal = 1.0 / (camera.fov_y / 2.0).tan();
    let aspect = viewport.width / viewport.height;
    let ndc_x = x * focal / aspect / depth;
    let ndc_y = y * focal / depth;
    if ndc_x.abs() > 1.0 || ndc_y.abs() > 1.0 {
        return None;
    }
    let size = if material.size_attenuation {
        material.point_size * (viewport.height / 2.0) / depth
    } else {
        material.point_size
    };
    Some(Sprite {
        x: (ndc_x + 1.0) / 2.0 * viewport.width,
        y: (1.0 - ndc_y) / 2.0 * viewport.height,
        size: size.max(MIN_SPRITE_PX),
        depth,
    })
}

#[derive(Debug, Clone)]
pub struct ParticleLayer {
    pub field: ParticleField,
    pub material: PointMaterial,
}

impl ParticleLayer {
    /// Projects every point. Layers that write depth come back far-to-near so
    /// that painting in order lets nearer points cover farther ones.
    pub fn sprites(&self, rotation: &Rotation, camera: &Camera, viewport: &Viewport) -> Vec<Sprite> {
        let mut sprites = self
            .field
            .positions()
            .iter()
            .filter_map(|p| project(*p, rotation, camera, viewport, &self.material))
            .collect::<Vec<_>>();
        if self.material.depth_write {
            sprites.sort_by(|a, b| b.depth.total_cmp(&a.depth));
        }
        sprites
    }
}

/// The sampled form of a `BackgroundConfig`. Built on mount, dropped on unmount.
#[derive(Debug, Clone)]
pub struct ParticleScene {
    pub camera: Camera,
    pub layers: Vec<ParticleLayer>,
}

impl ParticleScene {
    pub fn from_config(config: &BackgroundConfig) -> Self {
        let layers = config
            .layers
            .iter()
            .map(|l| ParticleLayer {
                field: ParticleField::random(l.count, l.extent),
                material: l.material,
            })
            .collect();
        Self {
            camera: Camera::at(config.camera_z),
            layers,
        }
    }

    pub fn point_count(&self) -> usize {
        self.layers.iter().map(|l| l.field.len()).sum()
    }
}

/// Shared view of the orientation most recently written by an animator.
#[derive(Debug, Clone, Default)]
pub struct OrientationHandle(Arc<Mutex<Rotation>>);

impl OrientationHandle {
    pub fn get(&self) -> Rotation {
        match self.0.lock() {
            Ok(r) => *r,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    fn set(&self, rotation: Rotation) {
        match self.0.lock() {
            Ok(mut r) => *r = rotation,
            Err(poisoned) => *poisoned.into_inner() = rotation,
        }
    }
}

/// Drives a background's orientation from frame timestamps. Frames are only
/// applied between `start` and `stop`.
#[derive(Debug)]
pub struct ParticleAnimator {
    motion: Motion,
    started_at: Option<f64>,
    drift_x: f32,
    current: Rotation,
    orientation: OrientationHandle,
    running: bool,
}

impl ParticleAnimator {
    pub fn new(motion: Motion) -> Self {
        Self {
            motion,
            started_at: None,
            drift_x: 0.0,
            current: Rotation::ZERO,
            orientation: OrientationHandle::default(),
            running: false,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn orientation(&self) -> OrientationHandle {
        self.orientation.clone()
    }

    /// Advances to the frame at `timestamp_ms`. The first frame after creation
    /// defines time zero. Returns the wrapped rotation written, or `None` when
    /// stopped.
    pub fn frame(&mut self, timestamp_ms: f64, pointer: PointerOffset) -> Option<Rotation> {
        if !self.running {
            return None;
        }
        let start = *self.started_at.get_or_insert(timestamp_ms);
        let elapsed = ((timestamp_ms - start) / 1000.0).max(0.0) as f32;
        let target = self.motion.target(elapsed, pointer);
        self.current = match self.motion {
            Motion::TimeDriven { .. } => target,
            Motion::PointerDrift { pointer_gain, .. } => {
                self.drift_x += pointer.y * pointer_gain;
                Rotation {
                    x: target.x + self.drift_x,
                    ..target
                }
            }
            Motion::Smoothed { blend, .. } => self.current.lerp(target, blend.clamp(0.0, 1.0)),
        };
        let wrapped = self.current.wrapped();
        self.orientation.set(wrapped);
        Some(wrapped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    const EPS: f32 = 1e-5;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn test_field_size_and_bounds() {
        let field = ParticleField::random(1500, 10.0);
        assert_eq!(field.len(), 1500);
        assert_eq!(field.extent(), 10.0);
        for p in field.positions() {
            for c in p {
                assert!((-5.0..=5.0).contains(c), "coordinate {c} out of range");
            }
        }
    }

    #[test]
    fn test_regenerated_fields_differ() {
        let first = ParticleField::random(1500, 10.0);
        let second = ParticleField::random(1500, 10.0);
        assert_ne!(first, second);
        let shared = first
            .positions()
            .iter()
            .zip(second.positions())
            .filter(|(a, b)| a == b)
            .count();
        assert!(shared < 3, "{shared} identical points between two samples");
    }

    #[test]
    fn test_field_is_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(7);
        let field = ParticleField::generate(6000, 10.0, &mut rng);
        let mean_x = field.positions().iter().map(|p| p[0]).sum::<f32>() / field.len() as f32;
        assert!(mean_x.abs() < 0.2, "mean x drifted to {mean_x}");
        let positive = field.positions().iter().filter(|p| p[1] > 0.0).count();
        assert!((2700..3300).contains(&positive));
    }

    #[test]
    fn test_empty_field() {
        let field = ParticleField::random(0, 50.0);
        assert!(field.is_empty());
    }

    #[test]
    fn test_time_driven_rotation_is_linear() {
        let motion = Motion::TimeDriven {
            rates: Rotation {
                x: 0.01,
                y: 0.005,
                z: 0.0,
            },
        };
        let mut animator = ParticleAnimator::new(motion);
        animator.start();
        animator.frame(1000.0, PointerOffset::default());
        let r = animator.frame(13_000.0, PointerOffset::default()).unwrap();
        assert!(close(r.x, 12.0 * 0.01));
        assert!(close(r.y, 12.0 * 0.005));
        assert!(close(r.z, 0.0));
    }

    #[test]
    fn test_rotation_wraps_at_tau() {
        let motion = Motion::TimeDriven {
            rates: Rotation {
                x: 1.0,
                y: 0.0,
                z: 0.0,
            },
        };
        let t = 10.0_f32;
        let r = motion.target(t, PointerOffset::default()).wrapped();
        assert!(close(r.x, t.rem_euclid(TAU)));
        assert!(r.x < TAU);
    }

    #[test]
    fn test_pointer_drift_accumulates() {
        let motion = Motion::PointerDrift {
            rates: Rotation {
                x: 0.0,
                y: 0.005,
                z: 0.0,
            },
            pointer_gain: 0.1,
        };
        let mut animator = ParticleAnimator::new(motion);
        animator.start();
        let pointer = PointerOffset { x: 0.5, y: 1.0 };
        animator.frame(0.0, pointer);
        let r = animator.frame(2000.0, pointer).unwrap();
        assert!(close(r.x, 0.2));
        assert!(close(r.y, 2.0 * 0.005 + 0.05));
    }

    #[test]
    fn test_smoothing_moves_partway_to_target() {
        let motion = Motion::Smoothed {
            rates: Rotation::ZERO,
            pointer_gain: 1.0,
            blend: 0.1,
        };
        let mut animator = ParticleAnimator::new(motion);
        animator.start();
        let pointer = PointerOffset { x: 1.0, y: 0.0 };
        let first = animator.frame(0.0, pointer).unwrap();
        assert!(close(first.y, 0.1));
        let second = animator.frame(16.0, pointer).unwrap();
        assert!(close(second.y, 0.19));
        for i in 0..500 {
            animator.frame(32.0 + i as f64 * 16.0, pointer);
        }
        assert!(close(animator.orientation().get().y, 1.0));
    }

    #[test]
    fn test_stopped_animator_writes_nothing() {
        let motion = Motion::TimeDriven {
            rates: Rotation {
                x: 0.5,
                y: 0.5,
                z: 0.5,
            },
        };
        let mut animator = ParticleAnimator::new(motion);
        let handle = animator.orientation();
        assert!(animator.frame(0.0, PointerOffset::default()).is_none());

        animator.start();
        animator.frame(0.0, PointerOffset::default());
        animator.frame(1000.0, PointerOffset::default());
        let before = handle.get();
        assert!(before.x > 0.0);

        animator.stop();
        assert!(animator.frame(5000.0, PointerOffset::default()).is_none());
        assert_eq!(handle.get(), before);
    }

    #[test]
    fn test_pointer_from_client() {
        let centre = PointerOffset::from_client(500.0, 400.0, 1000.0, 800.0);
        assert!(close(centre.x, 0.0) && close(centre.y, 0.0));
        let top_left = PointerOffset::from_client(0.0, 0.0, 1000.0, 800.0);
        assert!(close(top_left.x, -1.0) && close(top_left.y, 1.0));
        assert_eq!(
            PointerOffset::from_client(10.0, 10.0, 0.0, 0.0),
            PointerOffset::default()
        );
    }

    #[test]
    fn test_rgb_parsing() {
        assert_eq!(
            "#8b5cf6".parse::<Rgb>(),
            Ok(Rgb {
                r: 0x8b,
                g: 0x5c,
                b: 0xf6
            })
        );
        assert_eq!("#fff".parse::<Rgb>(), Ok(Rgb::WHITE));
        assert!(matches!("ffffff".parse::<Rgb>(), Err(ColorError::MissingHash(_))));
        assert!(matches!("#ggg000".parse::<Rgb>(), Err(ColorError::InvalidHex(_))));
        assert_eq!(String::from(Rgb::WHITE), "#ffffff");
    }

    #[test]
    fn test_material_from_json() {
        let m: PointMaterial = serde_json::from_str(
            r##"{"color":"#ffffff","point_size":0.003,"opacity":1.4,"blending":"additive"}"##,
        )
        .unwrap();
        assert!(m.transparent && m.size_attenuation && !m.depth_write);
        assert_eq!(m.blending.composite_operation(), "lighter");
        assert_eq!(m.effective_opacity(), 1.0);
    }

    #[test]
    fn test_projection_centre_and_culling() {
        let camera = Camera::at(5.0);
        let viewport = Viewport {
            width: 800.0,
            height: 600.0,
        };
        let material = PointMaterial::default();
        let s = project([0.0, 0.0, 0.0], &Rotation::ZERO, &camera, &viewport, &material).unwrap();
        assert!(close(s.x, 400.0) && close(s.y, 300.0));
        assert!(close(s.depth, 5.0));
        assert_eq!(s.size, MIN_SPRITE_PX);

        // behind the camera
        assert!(project([0.0, 0.0, 6.0], &Rotation::ZERO, &camera, &viewport, &material).is_none());
        // far outside the frustum
        assert!(project([100.0, 0.0, 0.0], &Rotation::ZERO, &camera, &viewport, &material).is_none());
    }

    #[test]
    fn test_size_attenuation() {
        let camera = Camera::at(2.0);
        let viewport = Viewport {
            width: 800.0,
            height: 800.0,
        };
        let material = PointMaterial {
            point_size: 0.1,
            ..PointMaterial::default()
        };
        let near = project([0.0, 0.0, 1.0], &Rotation::ZERO, &camera, &viewport, &material).unwrap();
        let far = project([0.0, 0.0, -1.0], &Rotation::ZERO, &camera, &viewport, &material).unwrap();
        assert!(close(near.size, 40.0));
        assert!(near.size > far.size);
    }

    #[test]
    fn test_rotation_apply_quarter_turn() {
        let r = Rotation {
            x: 0.0,
            y: 0.0,
            z: TAU / 4.0,
        };
        let [x, y, z] = r.apply([1.0, 0.0, 0.0]);
        assert!(close(x, 0.0) && close(y, 1.0) && close(z, 0.0));
    }

    #[test]
    fn test_scene_from_config() {
        let config: BackgroundConfig = serde_json::from_str(
            r##"{
                "camera_z": 8.0,
                "motion": {"kind": "pointer-drift", "rates": {"x": 0.0, "y": 0.005}, "pointer_gain": 0.0001},
                "layers": [
                    {"count": 20, "extent": 30.0, "material": {"color": "#ffffff", "point_size": 0.003, "opacity": 0.8}},
                    {"count": 5, "extent": 20.0, "material": {"color": "#8b5cf6", "point_size": 0.008, "opacity": 0.3}}
                ]
            }"##,
        )
        .unwrap();
        let scene = ParticleScene::from_config(&config);
        assert_eq!(scene.point_count(), 25);
        assert_eq!(scene.camera.z, 8.0);
        assert_eq!(scene.layers[1].material.color.r, 0x8b);
    }

    #[test]
    fn test_depth_write_sorts_far_to_near() {
        let layer = ParticleLayer {
            field: ParticleField {
                positions: vec![[0.0, 0.0, 1.0], [0.0, 0.0, -1.0], [0.0, 0.0, 0.0]],
                extent: 2.0,
            },
            material: PointMaterial {
                depth_write: true,
                ..PointMaterial::default()
            },
        };
        let sprites = layer.sprites(
            &Rotation::ZERO,
            &Camera::at(5.0),
            &Viewport {
                width: 100.0,
                height: 100.0,
            },
        );
        let depths = sprites.iter().map(|s| s.depth).collect::<Vec<_>>();
        assert_eq!(depths, vec![6.0, 5.0, 4.0]);
    }
}
