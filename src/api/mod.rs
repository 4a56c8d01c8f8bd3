pub mod client;
pub mod error;
pub mod types;

pub use client::{ApiClient, BackendApi};
pub use error::ApiError;
pub use types::{
    ConteudoResponse, EditalExtraido, JobStatus, JobStatusResponse, ProjetoRequest,
    ProjetoResponse, ProvasResponse, ResultadoExtracao, TaxonomiaExtraida, UploadPdfResponse,
};
