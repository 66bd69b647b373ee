//! Infrastructure layer for the MediBot client.
//!
//! Concrete implementations of the core traits: the HTTP API client, the
//! TOML-backed identity file, document storage, and the system viewer.

pub mod config_service;
pub mod document_store;
pub mod dto;
pub mod http_api;
pub mod identity_repository;
pub mod paths;
pub mod storage;
pub mod system_viewer;

pub use config_service::ConfigService;
pub use document_store::DocumentStore;
pub use http_api::HttpMediBotApi;
pub use identity_repository::TomlIdentityRepository;
pub use paths::MedibotPaths;
pub use system_viewer::SystemDocumentViewer;
