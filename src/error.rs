// Errors the host can hit while setting up or presenting frames.
// The renderer itself never fails; everything here lives at the window/env edge.
use std::fmt::{self, Display};

#[derive(Debug)]
pub enum Error {
    WindowInit(String),   // Creating the window failed
    WindowUpdate(String), // Pushing the framebuffer to the window failed
    Config(String),       // An environment value could not be parsed
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::WindowInit(s) => write!(f, "Window init error: {s}"),
            Error::WindowUpdate(s) => write!(f, "Window update error: {s}"),
            Error::Config(s) => write!(f, "Config error: {s}"),
        }
    }
}

// Needed so `?` can lift these into anyhow in main.
impl std::error::Error for Error {}
