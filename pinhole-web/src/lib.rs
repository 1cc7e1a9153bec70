/// Pinhole Web - canvas-backed surface for the projection pipeline
///
/// Pixels are kept in a local RGBA array and pushed to a 2D canvas context
/// with `putImageData` on present.
use pinhole_core::framebuffer::CHANNELS;
use pinhole_core::{Framebuffer, RenderError, RenderResult, SceneConfig, Spin, Surface};
use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

fn js_error(value: JsValue) -> RenderError {
    let msg = value.as_string().unwrap_or_else(|| format!("{value:?}"));
    RenderError::Io(std::io::Error::new(std::io::ErrorKind::Other, msg))
}

fn to_js(e: RenderError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// RGBA pixels presented onto a `<canvas>` element
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl CanvasSurface {
    /// Bind to the canvas with the given element id, sized to the canvas
    pub fn from_canvas_id(canvas_id: &str) -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id '{canvas_id}'")))?
            .dyn_into()
            .map_err(|_| JsValue::from_str(&format!("'{canvas_id}' is not a canvas")))?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;

        let (width, height) = (canvas.width() as usize, canvas.height() as usize);
        log::info!("bound canvas '{canvas_id}' ({width}x{height})");
        Ok(Self {
            ctx,
            width,
            height,
            pixels: vec![0; width * height * CHANNELS],
        })
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    fn present(&mut self) -> RenderResult<()> {
        let image = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(&self.pixels),
            self.width as u32,
            self.height as u32,
        )
        .map_err(js_error)?;
        self.ctx.put_image_data(&image, 0.0, 0.0).map_err(js_error)
    }
}

#[wasm_bindgen]
pub struct WebRenderer {
    mesh: pinhole_core::Mesh,
    camera: pinhole_core::Camera,
    projector: pinhole_core::Projector,
    color: pinhole_core::Rgb,
    spin: Spin,
    framebuffer: Framebuffer<CanvasSurface>,
}

#[wasm_bindgen]
impl WebRenderer {
    /// Bind to a canvas, optionally with a TOML scene description
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, scene_toml: Option<String>) -> Result<WebRenderer, JsValue> {
        let config = match scene_toml {
            Some(text) => SceneConfig::from_toml_str(&text).map_err(to_js)?,
            None => SceneConfig::default(),
        };
        let surface = CanvasSurface::from_canvas_id(canvas_id)?;
        let projector = config.projector(surface.width(), surface.height());

        Ok(WebRenderer {
            mesh: config.mesh(),
            camera: config.camera().map_err(to_js)?,
            projector,
            color: config.render.color,
            spin: Spin::default(),
            framebuffer: Framebuffer::new(surface).map_err(to_js)?,
        })
    }

    /// Render a frame; returns the number of points drawn
    pub fn render(&mut self) -> Result<usize, JsValue> {
        let pivot = self.camera.point_of_interest();
        let mesh = self.mesh.transformed(&self.spin.matrix_about(&pivot));
        let stats = pinhole_core::render_frame(
            &mesh,
            &self.camera,
            &self.projector,
            &mut self.framebuffer,
            self.color,
        )
        .map_err(to_js)?;
        Ok(stats.points_drawn)
    }

    pub fn rotate(&mut self, d_pitch: f32, d_yaw: f32, d_roll: f32) {
        self.spin.advance(d_pitch, d_yaw, d_roll);
    }

    /// Blank the canvas and the pixel array
    pub fn clear(&mut self) -> Result<(), JsValue> {
        self.framebuffer.clear();
        self.framebuffer.present().map_err(to_js)
    }
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_log::init_with_level(log::Level::Info)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(())
}
