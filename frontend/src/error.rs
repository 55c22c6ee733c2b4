use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures that can stop a behaviour from being mounted.
#[derive(Error, Debug)]
pub enum Error {
    #[error("no global window")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    /// A web-sys call rejected; carries the debug text of the thrown value
    #[error("DOM call failed: {0}")]
    Dom(String),

    #[error("invalid site config: {0}")]
    Config(#[from] serde_json::Error),
}

impl From<JsValue> for Error {
    fn from(value: JsValue) -> Self {
        Error::Dom(format!("{:?}", value))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
