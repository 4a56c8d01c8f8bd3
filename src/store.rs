//! Application store: the shared UI-facing state container.
//!
//! Holds the active edital, the committed question list, the incidence
//! tree and the browse filters. Single-writer discipline: only the
//! orchestrator's finish transition writes the edital/question/incidence
//! fields; everything else reads.

use serde::{Deserialize, Serialize};

use crate::api::types::EditalExtraido;
use crate::incidence::IncidenciaNode;
use crate::model::Questao;

/// Text/numeric filters applied when browsing the committed questions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Filtros {
    pub disciplina: Option<String>,
    pub ano: Option<i32>,
    pub banca: Option<String>,
}

/// Global application state.
#[derive(Debug, Default)]
pub struct AppStore {
    pub edital_ativo: Option<EditalExtraido>,
    pub questoes: Vec<Questao>,
    pub incidencia: Vec<IncidenciaNode>,
    pub filtros: Filtros,
}

impl AppStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit the outcome of a finished workflow. Called exactly once per
    /// successful finish, by the orchestrator.
    pub fn commit(
        &mut self,
        edital: EditalExtraido,
        questoes: Vec<Questao>,
        incidencia: Vec<IncidenciaNode>,
    ) {
        self.edital_ativo = Some(edital);
        self.questoes = questoes;
        self.incidencia = incidencia;
    }

    /// The committed questions that match the current filters.
    /// Text filters are case-insensitive substring matches.
    pub fn questoes_filtradas(&self) -> Vec<&Questao> {
        self.questoes
            .iter()
            .filter(|q| {
                self.filtros
                    .disciplina
                    .as_ref()
                    .is_none_or(|d| contem(&q.disciplina, d))
            })
            .filter(|q| self.filtros.ano.is_none_or(|ano| q.ano == ano))
            .filter(|q| {
                self.filtros
                    .banca
                    .as_ref()
                    .is_none_or(|b| contem(&q.banca, b))
            })
            .collect()
    }

    pub fn limpar_filtros(&mut self) {
        self.filtros = Filtros::default();
    }
}

fn contem(campo: &str, filtro: &str) -> bool {
    campo.to_lowercase().contains(&filtro.to_lowercase())
}
