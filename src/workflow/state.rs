use std::fmt;

use serde::{Deserialize, Serialize};

/// The three steps of the edital upload workflow.
///
/// Each run flows through: EDITAL → CONTEUDO_PROGRAMATICO → PROVAS,
/// with backward navigation allowed and step 2 skippable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Etapa {
    Edital,
    ConteudoProgramatico,
    Provas,
}

impl Etapa {
    /// 1-based step number shown to the user.
    pub fn numero(&self) -> u8 {
        match self {
            Etapa::Edital => 1,
            Etapa::ConteudoProgramatico => 2,
            Etapa::Provas => 3,
        }
    }

    /// The step after this one, or `None` at the last step.
    pub fn proxima(&self) -> Option<Etapa> {
        match self {
            Etapa::Edital => Some(Etapa::ConteudoProgramatico),
            Etapa::ConteudoProgramatico => Some(Etapa::Provas),
            Etapa::Provas => None,
        }
    }

    /// The step before this one, or `None` at the first step.
    pub fn anterior(&self) -> Option<Etapa> {
        match self {
            Etapa::Edital => None,
            Etapa::ConteudoProgramatico => Some(Etapa::Edital),
            Etapa::Provas => Some(Etapa::ConteudoProgramatico),
        }
    }
}

impl fmt::Display for Etapa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Etapa::Edital => write!(f, "EDITAL"),
            Etapa::ConteudoProgramatico => write!(f, "CONTEUDO_PROGRAMATICO"),
            Etapa::Provas => write!(f, "PROVAS"),
        }
    }
}

/// Per-step lifecycle status tracked by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusEtapa {
    /// Nothing received yet.
    Ociosa,
    /// An upload is in flight; no other file is accepted.
    Enviando,
    /// Extraction succeeded (steps 1 and 2).
    Extraida,
    /// Step 2 was advanced past without an upload.
    Pulada,
    /// Step 3 has at least one batch result set.
    ResultadosParciais,
    /// The last attempt failed; the step is retryable.
    Erro,
}

impl StatusEtapa {
    pub fn em_andamento(&self) -> bool {
        matches!(self, StatusEtapa::Enviando)
    }
}

impl fmt::Display for StatusEtapa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusEtapa::Ociosa => write!(f, "OCIOSA"),
            StatusEtapa::Enviando => write!(f, "ENVIANDO"),
            StatusEtapa::Extraida => write!(f, "EXTRAIDA"),
            StatusEtapa::Pulada => write!(f, "PULADA"),
            StatusEtapa::ResultadosParciais => write!(f, "RESULTADOS_PARCIAIS"),
            StatusEtapa::Erro => write!(f, "ERRO"),
        }
    }
}
