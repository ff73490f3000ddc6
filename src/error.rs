use thiserror::Error;
use wasm_bindgen::JsValue;

pub type Result<T, E = MenuError> = std::result::Result<T, E>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MenuError {
    #[error("no element matches `{0}`")]
    MissingElement(String),

    #[error("{links} links but {textures} textures; every link needs exactly one image")]
    LinkCountMismatch { links: usize, textures: usize },

    #[error("menu has no links")]
    EmptyGallery,

    #[error("link {index} is out of range (menu has {len})")]
    UnknownLink { index: usize, len: usize },

    #[error("invalid value `{value}` for data-{key}")]
    InvalidConfig { key: String, value: String },

    #[error("WebGL2 not supported")]
    Context,

    #[error("shader: {0}")]
    Shader(String),

    #[error("{0}")]
    Js(String),
}

impl From<JsValue> for MenuError {
    fn from(value: JsValue) -> Self {
        MenuError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<MenuError> for JsValue {
    fn from(err: MenuError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
