//! provaflow — orquestração de upload e classificação de provas de concurso.
//!
//! O fluxo principal é o workflow de 3 etapas dirigido pelo
//! [`Orquestrador`]: extração do edital, extração opcional do conteúdo
//! programático e extração em lote das provas vinculadas, concluído pela
//! transição de finalização que monta as questões, constrói a árvore de
//! incidência e grava tudo no [`AppStore`]. Uploads avulsos passam pelo
//! [`poller`], que acompanha jobs assíncronos do backend.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod incidence;
pub mod logging;
pub mod model;
pub mod poller;
pub mod store;
pub mod ui;
pub mod workflow;

pub use api::{ApiClient, BackendApi};
pub use config::ProvaflowConfig;
pub use error::{PollError, WorkflowError};
pub use incidence::{IncidenciaNode, construir_incidencia};
pub use model::{ArquivoUpload, Questao};
pub use store::AppStore;
pub use workflow::{Etapa, Orquestrador, ResumoFinal, StatusEtapa};
