//! Presentation Layer
//!
//! HTTP handlers, DTOs and routers.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::{BookAppState, QuestionAppState};
pub use router::{book_router, question_router};
