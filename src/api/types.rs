//! Tipos de dados para requisições e respostas da API de processamento de PDFs.
//!
//! Todas as structs derivam `Serialize` e `Deserialize` para conversão JSON
//! conforme o formato retornado pelos endpoints de extração do backend.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::QuestaoBruta;

/// Resposta do endpoint de upload de edital.
///
/// Contém os dados extraídos do PDF: identificador, nome do certame,
/// banca organizadora, ano e as listas de cargos e disciplinas detectadas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditalExtraido {
    /// Identificador do edital gerado pelo backend.
    pub edital_id: String,
    /// Nome do certame (ex.: "Concurso TRF 3ª Região 2024").
    pub nome: String,
    /// Banca organizadora, quando identificada no documento.
    pub banca: Option<String>,
    /// Ano do certame, quando identificado.
    pub ano: Option<i32>,
    /// Cargos candidatos encontrados no edital.
    #[serde(default)]
    pub cargos: Vec<String>,
    /// Áreas de conhecimento identificadas.
    #[serde(default)]
    pub disciplinas: Vec<String>,
}

/// Resposta do endpoint de upload de conteúdo programático.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConteudoResponse {
    /// Taxonomia extraída do documento. Ausente quando o backend não
    /// conseguiu estruturar o conteúdo.
    pub taxonomia: Option<TaxonomiaExtraida>,
}

/// Estrutura hierárquica do conteúdo programático (disciplina → tópicos).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonomiaExtraida {
    #[serde(default)]
    pub disciplinas: Vec<DisciplinaTaxonomia>,
}

impl TaxonomiaExtraida {
    /// Nomes das disciplinas presentes na taxonomia, na ordem do documento.
    pub fn disciplinas_nomes(&self) -> Vec<&str> {
        self.disciplinas.iter().map(|d| d.nome.as_str()).collect()
    }
}

/// Uma disciplina dentro da taxonomia, com seus tópicos e assuntos.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisciplinaTaxonomia {
    pub nome: String,
    /// Árvore de tópicos, com profundidade arbitrária.
    #[serde(default)]
    pub itens: Vec<ItemTaxonomia>,
    /// Lista plana de assuntos, usada por bancas que não estruturam tópicos.
    #[serde(default)]
    pub assuntos: Vec<AssuntoTaxonomia>,
}

/// Um tópico recursivo do conteúdo programático.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemTaxonomia {
    pub nome: String,
    #[serde(default)]
    pub itens: Vec<ItemTaxonomia>,
}

/// Um assunto plano dentro de uma disciplina.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssuntoTaxonomia {
    pub nome: String,
}

/// Resposta do endpoint de upload de provas vinculadas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvasResponse {
    #[serde(default)]
    pub results: Vec<ResultadoExtracao>,
}

/// Resultado da extração de um único arquivo de prova.
///
/// O lote é atômico do ponto de vista do cliente: uma requisição cobre
/// todos os arquivos e falhas parciais são reportadas por arquivo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultadoExtracao {
    pub success: bool,
    pub filename: String,
    /// Formato detectado da prova (ex.: "cebraspe", "fcc").
    pub format: Option<String>,
    /// Total de questões reportado pelo extrator.
    pub total_questoes: Option<u32>,
    /// Questões brutas extraídas, na ordem do documento.
    #[serde(default)]
    pub questoes: Vec<QuestaoBruta>,
    /// Metadados do arquivo (ano, banca, cargo) usados como fallback
    /// na montagem final das questões.
    #[serde(default)]
    pub metadados: HashMap<String, serde_json::Value>,
    /// Mensagem de erro quando `success` é falso.
    pub error: Option<String>,
}

/// Resposta do endpoint de upload simples de PDF.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadPdfResponse {
    pub job_id: String,
}

/// Estado de um job assíncrono de processamento no backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    /// Um job terminou quando completou ou falhou.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

/// Resposta do endpoint de consulta de status de job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatusResponse {
    pub status: JobStatus,
    /// Progresso local do job, de 0 a 100. Ausente em estados terminais.
    pub progress: Option<f64>,
    /// Mensagem de erro fornecida pelo servidor quando `status` é `failed`.
    pub error: Option<String>,
}

/// Corpo da requisição de criação de projeto.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjetoRequest {
    pub nome: String,
    pub banca: Option<String>,
    pub cargo: Option<String>,
    pub ano: Option<i32>,
}

/// Resposta da criação de projeto.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjetoResponse {
    pub id: String,
}

/// Corpo da requisição de vínculo edital → projeto.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VincularEditalRequest {
    pub edital_id: String,
}
