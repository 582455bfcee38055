//! Fasting page wiring
//!
//! Starts the repeating timer and hooks up the "undefined length" checkbox.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::Utc;
use fastwell::config::FastingConfig;
use fastwell::timer::init_fasting_page;
use gloo_timers::callback::Interval;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::dom::DomView;

thread_local! {
    static RUNNING_TIMER: RefCell<Option<Interval>> = const { RefCell::new(None) };
}

/// Initialize the fasting page; never fails, problems are logged to the console
pub fn start(view: DomView, config: &FastingConfig) {
    let view = Rc::new(view);
    let page = init_fasting_page(view.as_ref(), config, Utc::now());

    if let Some(e) = &page.error {
        web_sys::console::error_1(&format!("Error initializing fasting timer: {}", e).into());
    }

    if let Some(timer) = page.timer {
        let tick_view = view.clone();
        let interval = Interval::new(config.tick_interval_ms as u32, move || {
            timer.update(tick_view.as_ref(), Utc::now());
        });
        RUNNING_TIMER.with(|slot| {
            if let Some(previous) = slot.borrow_mut().replace(interval) {
                previous.cancel();
            }
        });
    }

    if let Some(toggle) = page.toggle {
        let Some(checkbox) = view.query(toggle.checkbox()) else {
            return;
        };

        let change_view = view.clone();
        let on_change = Closure::<dyn FnMut()>::new(move || {
            toggle.apply(change_view.as_ref());
        });

        if let Err(e) =
            checkbox.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())
        {
            web_sys::console::error_1(&e);
        }
        // Lives as long as the page
        on_change.forget();
    }
}

/// Cancel the repeating timer; returns whether one was running
pub fn stop() -> bool {
    RUNNING_TIMER.with(|slot| match slot.borrow_mut().take() {
        Some(interval) => {
            interval.cancel();
            true
        }
        None => false,
    })
}
