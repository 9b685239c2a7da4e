use crate::presenter::SectionPresenter;
use crate::render;
use crate::scroll::ScrollSource;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use storefront_core::{Camera, DepthEngine, SceneSnapshot, StarInstance, Starfield};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub engine: Rc<DepthEngine>,
    pub scroll: ScrollSource,
    pub presenter: Rc<RefCell<SectionPresenter>>,
    pub last_snapshot: Rc<RefCell<Option<SceneSnapshot>>>,

    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,
    pub starfield: Starfield,
    pub star_instances: Vec<StarInstance>,

    pub started: Instant,
    pub camera_depth: f32,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        // at most one engine evaluation per frame, however many scroll events arrived
        if self.scroll.take_dirty() {
            let snap = self.engine.snapshot(self.scroll.offset());
            self.camera_depth = snap.camera_depth;
            self.presenter.borrow_mut().apply(&snap);
            *self.last_snapshot.borrow_mut() = Some(snap);
        }

        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        gpu.resize_if_needed(self.canvas.width(), self.canvas.height());
        let t = self.started.elapsed().as_secs_f32();
        self.starfield
            .instances(self.camera_depth, t, &mut self.star_instances);
        let camera = Camera::at_depth(self.camera_depth, gpu.aspect());
        match gpu.render(&camera, &self.star_instances) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("[gpu] surface lost; reconfiguring");
                gpu.reconfigure();
            }
            Err(e) => log::error!("render error: {:?}", e),
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    instance_capacity: usize,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, instance_capacity).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::warn!("WebGPU unavailable, continuing without starfield: {:?}", e);
            None
        }
    }
}

/// Drive `ctx.frame()` from requestAnimationFrame for the lifetime of the page.
pub fn start_loop(ctx: FrameContext<'static>) {
    let ctx = Rc::new(RefCell::new(ctx));
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
