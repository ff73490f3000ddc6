use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};

use super::dom;
use crate::error::Result;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Calls `tick` once per animation frame until stopped.
pub struct RenderLoop {
    callback: FrameCallback,
    pending: Rc<Cell<Option<i32>>>,
    running: Rc<Cell<bool>>,
}

impl RenderLoop {
    pub fn start<F>(mut tick: F) -> Result<Self>
    where
        F: FnMut() + 'static,
    {
        // `callback` holds the animation-frame closure so that it can keep
        // calling `request_animation_frame` on itself. Storing it inside an
        // `Option` lets us create the `Closure` first and then reach it from
        // within itself.
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));
        let running = Rc::new(Cell::new(true));

        let weak = Rc::downgrade(&callback);
        let frame_pending = pending.clone();
        let frame_running = running.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            frame_pending.set(None);
            if !frame_running.get() {
                return;
            }
            tick();

            // schedule next
            let Some(callback) = weak.upgrade() else {
                return;
            };
            let Ok(window) = dom::window() else {
                return;
            };
            if let Some(f) = callback.borrow().as_ref() {
                match window.request_animation_frame(f.as_ref().unchecked_ref()) {
                    Ok(id) => frame_pending.set(Some(id)),
                    Err(err) => log::error!("request_animation_frame: {err:?}"),
                }
            };
        }) as Box<dyn FnMut()>));

        if let Some(f) = callback.borrow().as_ref() {
            let id = dom::window()?.request_animation_frame(f.as_ref().unchecked_ref())?;
            pending.set(Some(id));
        }

        Ok(RenderLoop {
            callback,
            pending,
            running,
        })
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// Cancel the pending frame and release the callback.
    pub fn stop(&mut self) {
        self.running.set(false);
        if let Some(id) = self.pending.take() {
            if let Ok(window) = dom::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
        self.callback.borrow_mut().take();
    }
}

impl Drop for RenderLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
