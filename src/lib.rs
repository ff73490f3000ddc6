//! Hover menu with a pointer-following, distorting WebGL image.
//!
//! The animation model (`animator`, `camera`, `motion`, `gallery`,
//! `geometry`) builds on every target so it can be tested on the host. The
//! DOM and WebGL side only exists on wasm32.

pub mod animator;
pub mod camera;
pub mod config;
pub mod error;
pub mod gallery;
pub mod geometry;
pub mod motion;

pub use animator::{Animator, Frame, InputEvent};
pub use camera::{PerspectiveCamera, Viewport};
pub use config::Config;
pub use error::{MenuError, Result};
pub use gallery::{Gallery, LinkId};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;

    use crate::config::Config;

    mod dom;
    mod gl;
    mod listeners;
    mod menu;
    mod render;
    mod texture;

    pub use menu::Menu;
    pub use texture::TextureState;

    thread_local! {
        static MENU: RefCell<Option<Menu>> = const { RefCell::new(None) };
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        let defaults = Config::default();
        let document = dom::document()?;
        let Some(container) = document.query_selector(&defaults.container)? else {
            log::warn!("no `{}` on this page; menu not mounted", defaults.container);
            return Ok(());
        };
        let config = defaults.apply_dataset(|key| dom::data_attribute(&container, key))?;

        let menu = Menu::mount(config)?;
        MENU.with(|slot| {
            if let Some(mut previous) = slot.borrow_mut().replace(menu) {
                previous.stop();
            }
        });
        Ok(())
    }

    /// Stop the animation and detach the menu started by `main`.
    #[wasm_bindgen]
    pub fn unmount() {
        MENU.with(|slot| {
            if let Some(mut menu) = slot.borrow_mut().take() {
                menu.stop();
            }
        });
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::{Menu, TextureState};
