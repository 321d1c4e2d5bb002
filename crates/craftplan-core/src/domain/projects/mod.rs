//! Project domain: entity, data access, and service

pub mod entity;
pub mod repository;
pub mod service;

pub use entity::{Project, ProjectDraft, ProjectUpdate};
pub use repository::ProjectRepository;
pub use service::ProjectService;
