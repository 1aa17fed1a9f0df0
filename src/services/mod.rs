pub mod direction;
pub mod frame;
pub mod gesture;
pub mod recognizer;
pub mod session;
