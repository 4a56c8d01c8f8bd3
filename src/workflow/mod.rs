pub mod assemble;
mod orchestrator;
mod state;

pub use assemble::{ContextoMontagem, Montagem, montar_questoes};
pub use orchestrator::{Orquestrador, ResumoFinal};
pub use state::{Etapa, StatusEtapa};
