//! Fastwell Web Widgets
//!
//! WebAssembly bindings for the fasting timer and weight chart.
//!
//! # Page contract
//!
//! - The fasting timer starts by itself once the document is ready.
//! - The weight tracker page calls `initializeChart(weights, dates, goalLine)`
//!   and passes the result to `setupThemeToggle(chart)`.
//! - Entry rows call `toggleEdit(entryId)` to show their edit form.
//!
//! Nothing here throws into the page; failures end up on the console.

use std::cell::RefCell;
use std::rc::Rc;

use fastwell::chart::{render_weight_chart, Theme, ThemeSync};
use fastwell::config::Config;
use fastwell::view::{toggle_edit as toggle_entry_edit, View};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

mod chart;
mod dom;
mod timer;

pub use chart::{CanvasSurface, ChartJs, ChartJsChart};
pub use dom::DomView;

/// Handle to a rendered weight chart
#[wasm_bindgen]
pub struct WeightChart {
    inner: Rc<RefCell<ChartJsChart>>,
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    on_document_ready(|| {
        if let Some(view) = DomView::current() {
            timer::start(view, &Config::default().fasting);
        }
    });
}

/// Render the weight chart; returns `undefined` if nothing was charted
#[wasm_bindgen(js_name = initializeChart)]
pub fn initialize_chart(weights: JsValue, dates: JsValue, goal_line: JsValue) -> Option<WeightChart> {
    let view = DomView::current()?;
    let settings = Config::default().chart;

    let surface = CanvasSurface::find(&view, &settings.canvas);
    let theme = Theme::from_dark_flag(view.root_has_class(&settings.dark_class));

    let result = render_weight_chart(
        surface.as_ref(),
        &ChartJs,
        &to_json(&weights),
        &to_json(&dates),
        &to_json(&goal_line),
        theme,
        &settings,
    );

    match result {
        Ok(chart) => chart.map(|chart| WeightChart {
            inner: Rc::new(RefCell::new(chart)),
        }),
        Err(e) => {
            web_sys::console::error_1(&format!("Error initializing weight chart: {}", e).into());
            None
        }
    }
}

/// Keep the chart's colors in step with the theme toggle
#[wasm_bindgen(js_name = setupThemeToggle)]
pub fn setup_theme_toggle(chart: Option<WeightChart>) {
    let Some(view) = DomView::current() else {
        return;
    };
    let settings = Config::default().chart;

    let toggle = view.query(&settings.theme_toggle);
    let Some(sync) = ThemeSync::attach(chart.map(|c| c.inner), toggle.is_some()) else {
        return;
    };
    let Some(toggle) = toggle else {
        return;
    };

    let dark_class = settings.dark_class;
    let on_click = Closure::<dyn FnMut()>::new(move || {
        sync.on_toggle(Theme::from_dark_flag(view.root_has_class(&dark_class)));
    });

    if let Err(e) = toggle.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref()) {
        web_sys::console::error_1(&e);
    }
    // Lives as long as the page
    on_click.forget();
}

/// Show or hide the inline edit form of a weight entry
#[wasm_bindgen(js_name = toggleEdit)]
pub fn toggle_edit(entry_id: &str) {
    if let Some(view) = DomView::current() {
        toggle_entry_edit(&view as &dyn View, entry_id);
    }
}

/// Stop refreshing the fasting timer; returns whether it was running
#[wasm_bindgen(js_name = stopFastingTimer)]
pub fn stop_fasting_timer() -> bool {
    timer::stop()
}

/// Convert a page value to JSON; anything unserializable becomes `null`
pub fn to_json(value: &JsValue) -> serde_json::Value {
    if value.is_undefined() || value.is_null() {
        return serde_json::Value::Null;
    }

    js_sys::JSON::stringify(value)
        .ok()
        .and_then(|s| s.as_string())
        .and_then(|s| serde_json::from_str(&s).ok())
        .unwrap_or(serde_json::Value::Null)
}

fn on_document_ready(init: impl FnOnce() + 'static) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    if document.ready_state() != "loading" {
        init();
        return;
    }

    let on_ready = Closure::once(init);
    if let Err(e) = document
        .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())
    {
        web_sys::console::error_1(&e);
    }
    on_ready.forget();
}
