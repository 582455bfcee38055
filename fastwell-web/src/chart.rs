//! Canvas surface and Chart.js engine
//!
//! Chart.js is loaded by the page as a global `Chart` constructor. The
//! configuration built by the core crate goes in as parsed JSON; the tooltip
//! callback is the only function added on top.

use fastwell::chart::{tooltip_label, ChartEngine, ChartSpec, RenderedChart, SeriesKind, Surface, Theme};
use fastwell::error::{WidgetError, WidgetResult};
use js_sys::{Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::dom::DomView;

mod ffi {
    use wasm_bindgen::prelude::*;
    use web_sys::CanvasRenderingContext2d;

    #[wasm_bindgen]
    extern "C" {
        pub type Chart;

        #[wasm_bindgen(constructor, catch)]
        pub fn new(ctx: &CanvasRenderingContext2d, config: &JsValue) -> Result<Chart, JsValue>;

        #[wasm_bindgen(method)]
        pub fn update(this: &Chart);

        #[wasm_bindgen(method, getter)]
        pub fn options(this: &Chart) -> JsValue;
    }
}

/// A `<canvas>` and its 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Find the canvas on the page; `None` if it is missing or has no 2D context
    pub fn find(view: &DomView, selector: &str) -> Option<Self> {
        let canvas = view
            .query(selector)?
            .dyn_into::<HtmlCanvasElement>()
            .ok()?;

        let ctx = match canvas.get_context("2d") {
            Ok(Some(ctx)) => ctx.dyn_into::<CanvasRenderingContext2d>().ok()?,
            _ => return None,
        };

        Some(Self { canvas, ctx })
    }
}

impl Surface for CanvasSurface {
    fn container_size(&self) -> (u32, u32) {
        match self.canvas.parent_element() {
            Some(parent) => (
                parent.client_width().max(0) as u32,
                parent.client_height().max(0) as u32,
            ),
            None => (self.canvas.width(), self.canvas.height()),
        }
    }

    fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn draw_message(&self, message: &str, font: &str, color: &str) {
        let width = self.canvas.width() as f64;
        let height = self.canvas.height() as f64;

        self.ctx.clear_rect(0.0, 0.0, width, height);
        self.ctx.set_font(font);
        self.ctx.set_fill_style(&color.into());
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        let _ = self.ctx.fill_text(message, width / 2.0, height / 2.0);
    }
}

/// The global Chart.js engine
pub struct ChartJs;

/// A live Chart.js line chart
pub struct ChartJsChart {
    chart: ffi::Chart,
}

impl ChartEngine<CanvasSurface> for ChartJs {
    type Chart = ChartJsChart;

    fn create(&self, surface: &CanvasSurface, spec: &ChartSpec) -> WidgetResult<ChartJsChart> {
        let config = js_sys::JSON::parse(&spec.to_json()?)
            .map_err(|e| WidgetError::Serialization(format!("{:?}", e)))?;

        let tooltip = Closure::<dyn Fn(JsValue) -> JsValue>::new(|context: JsValue| {
            let label = get_path(&context, &["dataset", "label"])
                .as_string()
                .unwrap_or_default();
            let raw = Reflect::get(&context, &"raw".into()).unwrap_or(JsValue::NULL);
            JsValue::from_str(&tooltip_label(SeriesKind::from_label(&label), js_number(&raw)))
        });

        set_path(
            &config,
            &["options", "plugins", "tooltip", "callbacks", "label"],
            tooltip.as_ref(),
        )?;

        let chart = ffi::Chart::new(&surface.ctx, &config)
            .map_err(|e| WidgetError::Engine(format!("{:?}", e)))?;

        // Chart.js keeps calling the tooltip after this handle is gone
        tooltip.forget();

        Ok(ChartJsChart { chart })
    }
}

impl RenderedChart for ChartJsChart {
    fn apply_theme(&mut self, theme: Theme) {
        let palette = theme.palette();
        let options = self.chart.options();

        let fields: [(&[&str], &str); 5] = [
            (&["scales", "y", "grid", "color"], palette.grid),
            (&["scales", "x", "grid", "color"], palette.grid),
            (&["scales", "y", "ticks", "color"], palette.text),
            (&["scales", "x", "ticks", "color"], palette.text),
            (&["plugins", "legend", "labels", "color"], palette.text),
        ];

        for (path, color) in fields {
            if let Err(e) = set_path(&options, path, &JsValue::from_str(color)) {
                web_sys::console::error_1(&format!("Failed to recolor chart: {}", e).into());
            }
        }
    }

    fn redraw(&mut self) {
        self.chart.update();
    }
}

/// Numeric value of a data point; `None` for null, undefined or non-numbers
fn js_number(value: &JsValue) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_string().and_then(|s| s.trim().parse().ok()))
        .filter(|v| v.is_finite())
}

fn get_path(root: &JsValue, path: &[&str]) -> JsValue {
    path.iter().fold(root.clone(), |node, key| {
        if node.is_object() {
            Reflect::get(&node, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED)
        } else {
            JsValue::UNDEFINED
        }
    })
}

/// Set `root.a.b.c = value`, creating intermediate objects as needed
fn set_path(root: &JsValue, path: &[&str], value: &JsValue) -> WidgetResult<()> {
    let Some((last, parents)) = path.split_last() else {
        return Ok(());
    };

    let mut node = root.clone();
    for key in parents {
        let key = JsValue::from_str(key);
        let mut child = Reflect::get(&node, &key).unwrap_or(JsValue::UNDEFINED);
        if !child.is_object() {
            child = Object::new().into();
            Reflect::set(&node, &key, &child)
                .map_err(|e| WidgetError::Engine(format!("{:?}", e)))?;
        }
        node = child;
    }

    Reflect::set(&node, &JsValue::from_str(last), value)
        .map_err(|e| WidgetError::Engine(format!("{:?}", e)))?;
    Ok(())
}
