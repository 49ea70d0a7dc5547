/// cubecut Web - WASM bindings that draw a scene onto an HTML canvas
///
/// JavaScript owns the sliders and forwards their values to
/// `WebScene::change_angle`; the flat accessors let a custom renderer read the
/// frame without going through `render`.
use cubecut_core::{Frame, LineStyle, Rgb, Scene, SceneError};
use js_sys::Array;
use nalgebra::Point2;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const STROKE: &str = "#ffffff";
const DASH: [f64; 2] = [6.0, 4.0];

#[wasm_bindgen]
pub struct WebScene {
    scene: Scene,
}

#[wasm_bindgen]
impl WebScene {
    /// Build a scene whose cutting plane is derived from `seed`
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> Result<WebScene, JsError> {
        let scene = Scene::from_seed(seed).map_err(to_js)?;
        Ok(WebScene { scene })
    }

    /// Slider callback: axis 0, 1 or 2 and an angle in degrees
    pub fn change_angle(&mut self, axis: usize, degrees: f64) -> Result<(), JsError> {
        self.scene.change_angle_index(axis, degrees).map_err(to_js)
    }

    /// Current X, Y, Z angles
    pub fn angles(&self) -> Vec<f64> {
        self.scene.angles().as_array().to_vec()
    }

    /// Projected edges as a flat `[x1, y1, x2, y2, ...]` list
    pub fn line_coords(&self) -> Vec<f64> {
        line_coords(self.scene.frame())
    }

    /// One flag per edge, parallel to `line_coords`
    pub fn line_dashed(&self) -> Vec<u8> {
        self.scene
            .frame()
            .lines
            .iter()
            .map(|line| u8::from(line.style == LineStyle::Dashed))
            .collect()
    }

    /// Plane fill outline as a flat `[x, y, ...]` list
    pub fn polygon_coords(&self) -> Vec<f64> {
        self.scene
            .frame()
            .polygon
            .iter()
            .flat_map(|polygon| polygon.points.iter().flat_map(|p| [p.x, p.y]))
            .collect()
    }

    pub fn fill_color(&self) -> String {
        self.scene.config().fill.to_hex()
    }

    /// Paint the current frame onto the canvas with the given element id
    pub fn render(&self, canvas_id: &str) -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("canvas '{canvas_id}' not found")))?
            .dyn_into()?;
        let context: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;

        paint(
            &context,
            self.scene.frame(),
            canvas.width() as f64,
            canvas.height() as f64,
        )
    }
}

fn paint(
    context: &CanvasRenderingContext2d,
    frame: &Frame,
    width: f64,
    height: f64,
) -> Result<(), JsValue> {
    context.set_fill_style_str(&Rgb::BLACK.to_hex());
    context.fill_rect(0.0, 0.0, width, height);

    let bounds = frame.bounds;
    let to_canvas = |p: &Point2<f64>| bounds.to_screen(p, width as usize, height as usize);

    let solid = Array::new();
    let dashed: Array = DASH.iter().map(|&d| JsValue::from_f64(d)).collect();
    context.set_stroke_style_str(STROKE);
    for line in &frame.lines {
        let pattern = match line.style {
            LineStyle::Solid => &solid,
            LineStyle::Dashed => &dashed,
        };
        context.set_line_dash(pattern)?;
        let (x0, y0) = to_canvas(&line.from);
        let (x1, y1) = to_canvas(&line.to);
        context.begin_path();
        context.move_to(x0, y0);
        context.line_to(x1, y1);
        context.stroke();
    }

    if let Some(polygon) = &frame.polygon {
        context.set_fill_style_str(&polygon.color.to_hex());
        context.begin_path();
        for (i, point) in polygon.points.iter().enumerate() {
            let (x, y) = to_canvas(point);
            if i == 0 {
                context.move_to(x, y);
            } else {
                context.line_to(x, y);
            }
        }
        context.close_path();
        context.fill();
    }

    Ok(())
}

fn line_coords(frame: &Frame) -> Vec<f64> {
    frame
        .lines
        .iter()
        .flat_map(|line| [line.from.x, line.from.y, line.to.x, line.to.y])
        .collect()
}

fn to_js(error: SceneError) -> JsError {
    JsError::new(&error.to_string())
}
