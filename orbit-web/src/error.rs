use std::fmt;

use orbit_core::OrbitError;
use wasm_bindgen::JsValue;

/// Shader pipeline stage, used in compile diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => write!(f, "VERTEX SHADER"),
            Self::Fragment => write!(f, "FRAGMENT SHADER"),
        }
    }
}

/// Errors that can occur while setting up the browser viewer.
#[derive(Debug)]
pub enum WebError {
    /// No element with the given id, or it is not a canvas.
    NoCanvas(String),
    /// The browser did not hand out a WebGL2 context.
    NoContext,
    /// Shader compilation failed; carries the driver's info log.
    ShaderCompile { stage: ShaderStage, log: String },
    /// Program linking failed; carries the driver's info log.
    ProgramLink(String),
    /// A GL object could not be created.
    ResourceCreation(&'static str),
    /// Camera options were rejected.
    Options(String),
    /// Exception thrown by a DOM call.
    Js(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCanvas(id) => write!(f, "no canvas element with id '{id}'"),
            Self::NoContext => write!(f, "your browser does not support WebGL2"),
            Self::ShaderCompile { stage, log } => write!(f, "{stage} {log}"),
            Self::ProgramLink(log) => write!(f, "program link failed: {log}"),
            Self::ResourceCreation(what) => write!(f, "failed to create {what}"),
            Self::Options(msg) => write!(f, "camera options: {msg}"),
            Self::Js(msg) => write!(f, "javascript error: {msg}"),
        }
    }
}

impl std::error::Error for WebError {}

impl From<JsValue> for WebError {
    fn from(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<OrbitError> for WebError {
    fn from(e: OrbitError) -> Self {
        Self::Options(e.to_string())
    }
}

impl From<WebError> for JsValue {
    fn from(e: WebError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shader_error_names_stage() {
        let err = WebError::ShaderCompile {
            stage: ShaderStage::Fragment,
            log: "0:12: syntax error".to_owned(),
        };
        assert_eq!(err.to_string(), "FRAGMENT SHADER 0:12: syntax error");
    }

    #[test]
    fn test_options_error_wraps_core() {
        let err: WebError = OrbitError::InvalidProjection("fov".to_owned()).into();
        assert_eq!(err.to_string(), "camera options: invalid projection: fov");
    }
}
