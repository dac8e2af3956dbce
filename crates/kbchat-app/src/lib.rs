//! KB Chat: WASM entry point.
//!
//! This crate is the composition root (DI wiring layer).
//! It assembles the platform adapters and hands them to the egui UI.

#[cfg(target_arch = "wasm32")]
mod app;

#[cfg(target_arch = "wasm32")]
mod entry {
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    const CANVAS_ID: &str = "kbchat_canvas";

    /// WASM entry point: called from index.html
    #[wasm_bindgen(start)]
    pub async fn main() {
        wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
        log::info!("KB Chat starting...");

        let web_options = eframe::WebOptions::default();

        let canvas = match gloo_utils::document()
            .get_element_by_id(CANVAS_ID)
            .and_then(|el| el.dyn_into::<web_sys::HtmlCanvasElement>().ok())
        {
            Some(canvas) => canvas,
            None => {
                log::error!("No canvas element with id '{}'", CANVAS_ID);
                return;
            }
        };

        wasm_bindgen_futures::spawn_local(async move {
            let started = eframe::WebRunner::new()
                .start(
                    canvas,
                    web_options,
                    Box::new(|cc| Ok(Box::new(super::app::ChatApp::new(cc)))),
                )
                .await;
            if let Err(e) = started {
                log::error!("Failed to start eframe: {:?}", e);
            }
        });
    }
}
