use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use leptos::{ev, html, prelude::*};
use leptos_use::{use_event_listener, use_raf_fn, use_window, utils::Pausable, UseRafFnCallbackArgs};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::particles::{
    BackgroundConfig, Motion, ParticleAnimator, ParticleScene, PointerOffset, Rotation, Viewport,
};

use super::dom::viewport_size;

/// 2D canvas painter for a particle scene. Points are drawn as small squares.
struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    canvas: HtmlCanvasElement,
    scene: ParticleScene,
    viewport: Viewport,
    dpr: f64,
}

impl CanvasRenderer {
    fn new(canvas: HtmlCanvasElement, scene: ParticleScene) -> Result<Self, String> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| format!("{e:?}"))?
            .ok_or("no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "not a 2d context")?;
        let mut renderer = Self {
            ctx,
            canvas,
            scene,
            viewport: Viewport {
                width: 0.0,
                height: 0.0,
            },
            dpr: 1.0,
        };
        renderer.fit();
        Ok(renderer)
    }

    /// Matches the backing store to the element's CSS size and pixel ratio.
    fn fit(&mut self) {
        let dpr = window().device_pixel_ratio().max(1.0);
        let width = self.canvas.client_width().max(0) as f32;
        let height = self.canvas.client_height().max(0) as f32;
        if width == self.viewport.width && height == self.viewport.height && dpr == self.dpr {
            return;
        }
        self.viewport = Viewport { width, height };
        self.dpr = dpr;
        self.canvas.set_width((width as f64 * dpr) as u32);
        self.canvas.set_height((height as f64 * dpr) as u32);
        if let Err(e) = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0) {
            log::debug!("couldn't scale particle canvas: {e:?}");
        }
    }

    fn draw(&mut self, rotation: &Rotation) {
        self.fit();
        let ctx = &self.ctx;
        ctx.clear_rect(
            0.0,
            0.0,
            self.viewport.width as f64,
            self.viewport.height as f64,
        );
        for layer in &self.scene.layers {
            let material = &layer.material;
            if let Err(e) =
                ctx.set_global_composite_operation(material.blending.composite_operation())
            {
                log::debug!("couldn't set particle blending: {e:?}");
            }
            ctx.set_global_alpha(material.effective_opacity() as f64);
            ctx.set_fill_style_str(&material.color.css(1.0));
            for s in layer.sprites(rotation, &self.scene.camera, &self.viewport) {
                let half = s.size / 2.0;
                ctx.fill_rect(
                    (s.x - half) as f64,
                    (s.y - half) as f64,
                    s.size as f64,
                    s.size as f64,
                );
            }
        }
    }
}

fn with_animator<T>(
    animator: &Mutex<ParticleAnimator>,
    f: impl FnOnce(&mut ParticleAnimator) -> T,
) -> Option<T> {
    animator.lock().ok().map(|mut a| f(&mut a))
}

/// Decorative animated point cloud filling its parent. Purely cosmetic: without
/// a usable canvas it stays blank and the page around it is unaffected.
#[component]
pub fn ParticleBackground(config: BackgroundConfig) -> impl IntoView {
    let canvas_ref = NodeRef::<html::Canvas>::new();
    let animator = Arc::new(Mutex::new(ParticleAnimator::new(config.motion)));
    let renderer = Rc::new(RefCell::new(None::<CanvasRenderer>));
    let pointer = RwSignal::new(PointerOffset::default());

    if !matches!(config.motion, Motion::TimeDriven { .. }) {
        let _ = use_event_listener(use_window(), ev::pointermove, move |ev| {
            let (width, height) = viewport_size();
            pointer.set(PointerOffset::from_client(
                ev.client_x() as f64,
                ev.client_y() as f64,
                width,
                height,
            ));
        });
    }

    Effect::new({
        let renderer = renderer.clone();
        let animator = animator.clone();
        move |_| {
            let Some(canvas) = canvas_ref.get() else {
                return;
            };
            let scene = ParticleScene::from_config(&config);
            let points = scene.point_count();
            match CanvasRenderer::new(canvas, scene) {
                Ok(r) => {
                    *renderer.borrow_mut() = Some(r);
                    with_animator(&animator, |a| a.start());
                    log::debug!("particle background started with {points} points");
                }
                Err(e) => log::warn!("particle background disabled: {e}"),
            }
        }
    });

    let orientation = with_animator(&animator, |a| a.orientation()).unwrap_or_default();
    let Pausable { pause, .. } = use_raf_fn({
        let animator = animator.clone();
        move |args: UseRafFnCallbackArgs| {
            let advanced =
                with_animator(&animator, |a| a.frame(args.timestamp, pointer.get_untracked()));
            if !matches!(advanced, Some(Some(_))) {
                return;
            }
            if let Some(r) = renderer.borrow_mut().as_mut() {
                r.draw(&orientation.get());
            }
        }
    });

    on_cleanup(move || {
        pause();
        with_animator(&animator, |a| a.stop());
    });

    view! { <canvas node_ref=canvas_ref class="block w-full h-full" aria-hidden="true"></canvas> }
}
