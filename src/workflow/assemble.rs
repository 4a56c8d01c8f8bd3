//! Finish-time question assembly.
//!
//! Flattens the successful extraction results into a single [`Questao`]
//! list, filling missing fields through the fallback chain: question
//! field → file metadata → edital/selection context → computed default.

use std::collections::HashMap;

use chrono::Datelike;
use serde_json::Value;

use crate::api::types::{EditalExtraido, ResultadoExtracao};
use crate::model::{Questao, alternativas_vazias};

/// Edital/selection context consulted when a question and its file
/// metadata are both silent about a field.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextoMontagem<'a> {
    pub edital: Option<&'a EditalExtraido>,
    pub cargo_selecionado: Option<&'a str>,
}

/// Output of the assembly pass.
#[derive(Debug, Clone)]
pub struct Montagem {
    /// Flattened questions from successful results with non-empty `questoes`.
    pub questoes: Vec<Questao>,
    /// Sum of each successful result's reported `total_questoes`.
    pub total_questoes: u32,
    /// Number of files whose extraction succeeded.
    pub arquivos_com_sucesso: usize,
}

/// Flatten and normalize the batch results.
///
/// Only successful results with at least one extracted question contribute
/// questions; the totals still count every successful file.
pub fn montar_questoes(resultados: &[ResultadoExtracao], ctx: &ContextoMontagem) -> Montagem {
    let total_questoes: u32 = resultados
        .iter()
        .filter(|r| r.success)
        .map(|r| r.total_questoes.unwrap_or(0))
        .sum();
    let arquivos_com_sucesso = resultados.iter().filter(|r| r.success).count();

    let ano_corrente = chrono::Local::now().year();
    let mut questoes = Vec::new();

    for resultado in resultados.iter().filter(|r| r.success && !r.questoes.is_empty()) {
        for bruta in &resultado.questoes {
            let indice = questoes.len() as u32;
            let meta = &resultado.metadados;

            questoes.push(Questao {
                id: indice + 1,
                numero: bruta.numero.unwrap_or(indice + 1),
                ano: bruta
                    .ano
                    .or_else(|| meta_ano(meta))
                    .or_else(|| ctx.edital.and_then(|e| e.ano))
                    .unwrap_or(ano_corrente),
                banca: bruta
                    .banca
                    .clone()
                    .or_else(|| meta_texto(meta, "banca"))
                    .or_else(|| ctx.edital.and_then(|e| e.banca.clone()))
                    .unwrap_or_default(),
                cargo: bruta
                    .cargo
                    .clone()
                    .or_else(|| meta_texto(meta, "cargo"))
                    .or_else(|| ctx.cargo_selecionado.map(str::to_string))
                    .unwrap_or_default(),
                disciplina: bruta.disciplina.clone().unwrap_or_default(),
                assunto: bruta.assunto.clone().unwrap_or_default(),
                enunciado: bruta.enunciado.clone().unwrap_or_default(),
                alternativas: bruta
                    .alternativas
                    .clone()
                    .unwrap_or_else(alternativas_vazias),
                gabarito: bruta.gabarito.clone().unwrap_or_default(),
                anulada: bruta.anulada.unwrap_or(false),
                motivo_anulacao: bruta.motivo_anulacao.clone(),
                classificacao: bruta.classificacao.clone(),
            });
        }
    }

    Montagem {
        questoes,
        total_questoes,
        arquivos_com_sucesso,
    }
}

fn meta_texto(meta: &HashMap<String, Value>, chave: &str) -> Option<String> {
    meta.get(chave).and_then(|v| match v {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    })
}

fn meta_ano(meta: &HashMap<String, Value>) -> Option<i32> {
    meta.get("ano").and_then(|v| match v {
        Value::Number(n) => n.as_i64().map(|n| n as i32),
        Value::String(s) => s.parse().ok(),
        _ => None,
    })
}
