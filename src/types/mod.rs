//! Small response types shared across handlers.

mod response;

pub use response::MessageResponse;
