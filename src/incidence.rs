//! Incidence tree builder.
//!
//! Derives a two-level grouping (disciplina → assunto) with counts and
//! percentages from a flat question list. Percentages at both levels are
//! computed against the grand total, not the parent's size.

use serde::{Deserialize, Serialize};

use crate::model::Questao;

/// Label for questions with no discipline information at all.
pub const SEM_CLASSIFICACAO: &str = "Sem classificação";
/// Label for questions with no subject information.
pub const SEM_ASSUNTO: &str = "Sem assunto";

/// A node in the incidence tree.
///
/// Discipline nodes carry `filhos`; subject nodes carry the backing
/// `questoes` list instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidenciaNode {
    pub nome: String,
    pub quantidade: usize,
    pub percentual: f64,
    pub filhos: Option<Vec<IncidenciaNode>>,
    pub questoes: Option<Vec<Questao>>,
}

/// Build the incidence tree for a question list.
///
/// Siblings at both levels are sorted by descending count; ties keep
/// encounter order. An empty input yields an empty tree.
pub fn construir_incidencia(questoes: &[Questao]) -> Vec<IncidenciaNode> {
    let total = questoes.len();
    if total == 0 {
        return Vec::new();
    }

    let mut disciplinas = agrupar(questoes, chave_disciplina);
    ordenar_por_quantidade(&mut disciplinas);

    disciplinas
        .into_iter()
        .map(|(nome, grupo)| {
            let mut assuntos = agrupar(&grupo, chave_assunto);
            ordenar_por_quantidade(&mut assuntos);

            let filhos = assuntos
                .into_iter()
                .map(|(nome, sub)| IncidenciaNode {
                    nome,
                    quantidade: sub.len(),
                    percentual: percentual(sub.len(), total),
                    filhos: None,
                    questoes: Some(sub),
                })
                .collect();

            IncidenciaNode {
                nome,
                quantidade: grupo.len(),
                percentual: percentual(grupo.len(), total),
                filhos: Some(filhos),
                questoes: None,
            }
        })
        .collect()
}

fn chave_disciplina(q: &Questao) -> String {
    q.classificacao
        .as_ref()
        .and_then(|c| c.disciplina.clone())
        .filter(|d| !d.is_empty())
        .or_else(|| Some(q.disciplina.clone()).filter(|d| !d.is_empty()))
        .unwrap_or_else(|| SEM_CLASSIFICACAO.to_string())
}

fn chave_assunto(q: &Questao) -> String {
    q.classificacao
        .as_ref()
        .and_then(|c| c.assunto.clone())
        .filter(|a| !a.is_empty())
        .or_else(|| Some(q.assunto.clone()).filter(|a| !a.is_empty()))
        .unwrap_or_else(|| SEM_ASSUNTO.to_string())
}

/// Group questions by key, preserving encounter order of the keys.
fn agrupar(questoes: &[Questao], chave: impl Fn(&Questao) -> String) -> Vec<(String, Vec<Questao>)> {
    let mut grupos: Vec<(String, Vec<Questao>)> = Vec::new();
    for q in questoes {
        let k = chave(q);
        match grupos.iter_mut().find(|(nome, _)| *nome == k) {
            Some((_, grupo)) => grupo.push(q.clone()),
            None => grupos.push((k, vec![q.clone()])),
        }
    }
    grupos
}

// sort_by is stable, so ties keep encounter order.
fn ordenar_por_quantidade(grupos: &mut [(String, Vec<Questao>)]) {
    grupos.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
}

fn percentual(quantidade: usize, total: usize) -> f64 {
    quantidade as f64 / total as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Classificacao, alternativas_vazias};

    fn questao(disciplina: &str, assunto: &str) -> Questao {
        Questao {
            id: 1,
            numero: 1,
            ano: 2024,
            banca: String::new(),
            cargo: String::new(),
            disciplina: disciplina.to_string(),
            assunto: assunto.to_string(),
            enunciado: String::new(),
            alternativas: alternativas_vazias(),
            gabarito: String::new(),
            anulada: false,
            motivo_anulacao: None,
            classificacao: None,
        }
    }

    fn questao_classificada(disciplina: &str, assunto: &str) -> Questao {
        let mut q = questao("bruta", "bruto");
        q.classificacao = Some(Classificacao {
            disciplina: Some(disciplina.to_string()),
            assunto: Some(assunto.to_string()),
            ..Default::default()
        });
        q
    }

    #[test]
    fn empty_input_yields_empty_tree() {
        assert!(construir_incidencia(&[]).is_empty());
    }

    #[test]
    fn counts_sum_to_input_length_and_percentages_to_100() {
        let questoes = vec![
            questao("Português", "Sintaxe"),
            questao("Português", "Crase"),
            questao("Direito", "Constitucional"),
            questao("", ""),
        ];
        let arvore = construir_incidencia(&questoes);

        let soma: usize = arvore.iter().map(|n| n.quantidade).sum();
        assert_eq!(soma, questoes.len());

        let pct: f64 = arvore.iter().map(|n| n.percentual).sum();
        assert!((pct - 100.0).abs() < 1e-9);
    }

    #[test]
    fn classification_takes_precedence_over_raw_fields() {
        let questoes = vec![questao_classificada("Matemática", "Juros")];
        let arvore = construir_incidencia(&questoes);
        assert_eq!(arvore[0].nome, "Matemática");
        assert_eq!(arvore[0].filhos.as_ref().unwrap()[0].nome, "Juros");
    }

    #[test]
    fn missing_fields_use_fixed_labels() {
        let questoes = vec![questao("", "")];
        let arvore = construir_incidencia(&questoes);
        assert_eq!(arvore[0].nome, SEM_CLASSIFICACAO);
        assert_eq!(arvore[0].filhos.as_ref().unwrap()[0].nome, SEM_ASSUNTO);
    }

    #[test]
    fn siblings_sorted_by_descending_count() {
        let questoes = vec![
            questao("Direito", "A"),
            questao("Português", "B"),
            questao("Português", "B"),
            questao("Português", "C"),
        ];
        let arvore = construir_incidencia(&questoes);
        assert_eq!(arvore[0].nome, "Português");
        assert_eq!(arvore[0].quantidade, 3);
        assert_eq!(arvore[1].nome, "Direito");

        let filhos = arvore[0].filhos.as_ref().unwrap();
        assert_eq!(filhos[0].nome, "B");
        assert_eq!(filhos[1].nome, "C");
    }

    #[test]
    fn ties_keep_encounter_order() {
        let questoes = vec![
            questao("Zoologia", "X"),
            questao("Anatomia", "Y"),
        ];
        let arvore = construir_incidencia(&questoes);
        assert_eq!(arvore[0].nome, "Zoologia");
        assert_eq!(arvore[1].nome, "Anatomia");
    }

    #[test]
    fn child_percentages_use_grand_total() {
        let questoes = vec![
            questao("Português", "Sintaxe"),
            questao("Português", "Sintaxe"),
            questao("Direito", "Penal"),
            questao("Direito", "Civil"),
        ];
        let arvore = construir_incidencia(&questoes);
        // "Sintaxe" holds 2 of 4 questions: 50% of the grand total,
        // not 100% of its parent.
        let portugues = arvore.iter().find(|n| n.nome == "Português").unwrap();
        let sintaxe = &portugues.filhos.as_ref().unwrap()[0];
        assert_eq!(sintaxe.quantidade, 2);
        assert!((sintaxe.percentual - 50.0).abs() < 1e-9);
    }

    #[test]
    fn leaf_nodes_carry_backing_questions() {
        let questoes = vec![questao("Português", "Sintaxe")];
        let arvore = construir_incidencia(&questoes);
        let folha = &arvore[0].filhos.as_ref().unwrap()[0];
        assert_eq!(folha.questoes.as_ref().unwrap().len(), 1);
        assert!(arvore[0].questoes.is_none());
    }
}
