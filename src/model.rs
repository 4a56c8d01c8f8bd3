use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// MIME type accepted at every upload surface.
pub const MIME_PDF: &str = "application/pdf";

/// Answer letters used when a question arrives without alternatives.
pub const LETRAS_ALTERNATIVAS: [&str; 5] = ["A", "B", "C", "D", "E"];

/// A file handed to an upload surface: name, MIME type and raw bytes.
#[derive(Debug, Clone)]
pub struct ArquivoUpload {
    pub nome: String,
    pub mime: String,
    pub dados: Vec<u8>,
}

impl ArquivoUpload {
    pub fn new(nome: impl Into<String>, mime: impl Into<String>, dados: Vec<u8>) -> Self {
        Self {
            nome: nome.into(),
            mime: mime.into(),
            dados,
        }
    }

    /// Reads a file from disk, inferring the MIME type from the extension.
    pub fn ler(path: &Path) -> Result<Self> {
        let dados = std::fs::read(path)
            .with_context(|| format!("falha ao ler arquivo {}", path.display()))?;
        let nome = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime = if nome.to_lowercase().ends_with(".pdf") {
            MIME_PDF
        } else {
            "application/octet-stream"
        };
        Ok(Self::new(nome, mime, dados))
    }

    pub fn is_pdf(&self) -> bool {
        self.mime == MIME_PDF
    }
}

/// A question exactly as the extractor returned it — every field optional.
/// The finish transition fills the gaps via the fallback chain in
/// [`assemble`](crate::workflow::assemble).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestaoBruta {
    pub numero: Option<u32>,
    pub ano: Option<i32>,
    pub banca: Option<String>,
    pub cargo: Option<String>,
    pub disciplina: Option<String>,
    /// Raw alternate subject field, used when no classification exists.
    pub assunto: Option<String>,
    pub enunciado: Option<String>,
    pub alternativas: Option<BTreeMap<String, String>>,
    pub gabarito: Option<String>,
    pub anulada: Option<bool>,
    pub motivo_anulacao: Option<String>,
    pub classificacao: Option<Classificacao>,
}

/// Classification assigned by the backend to an extracted question.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Classificacao {
    pub disciplina: Option<String>,
    pub assunto: Option<String>,
    pub topico: Option<String>,
    pub subtopico: Option<String>,
    pub confianca_disciplina: Option<f64>,
    pub confianca_assunto: Option<f64>,
    /// Cognitive-level tag (ex.: "aplicação", "memorização").
    pub nivel_cognitivo: Option<String>,
    /// Difficulty tag (ex.: "fácil", "difícil").
    pub dificuldade: Option<String>,
}

/// A fully assembled question, committed to the store at finish time.
/// Unlike [`QuestaoBruta`], every non-classification field is populated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Questao {
    /// Sequential id across the assembled list, starting at 1.
    pub id: u32,
    pub numero: u32,
    pub ano: i32,
    pub banca: String,
    pub cargo: String,
    pub disciplina: String,
    pub assunto: String,
    pub enunciado: String,
    /// Answer-letter → text. Keys are unique by construction (map).
    pub alternativas: BTreeMap<String, String>,
    pub gabarito: String,
    pub anulada: bool,
    pub motivo_anulacao: Option<String>,
    pub classificacao: Option<Classificacao>,
}

/// The empty five-option answer map used when the extractor found none.
pub fn alternativas_vazias() -> BTreeMap<String, String> {
    LETRAS_ALTERNATIVAS
        .iter()
        .map(|letra| (letra.to_string(), String::new()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arquivo_pdf_detection() {
        let pdf = ArquivoUpload::new("prova.pdf", MIME_PDF, vec![1, 2, 3]);
        assert!(pdf.is_pdf());

        let txt = ArquivoUpload::new("notas.txt", "text/plain", vec![]);
        assert!(!txt.is_pdf());
    }

    #[test]
    fn ler_infers_mime_from_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Edital_2024.PDF");
        std::fs::write(&path, b"%PDF-1.7").unwrap();

        let arquivo = ArquivoUpload::ler(&path).unwrap();
        assert_eq!(arquivo.mime, MIME_PDF);
        assert_eq!(arquivo.nome, "Edital_2024.PDF");
        assert_eq!(arquivo.dados, b"%PDF-1.7");
    }

    #[test]
    fn alternativas_vazias_has_five_letters() {
        let alts = alternativas_vazias();
        assert_eq!(alts.len(), 5);
        assert_eq!(alts.get("A"), Some(&String::new()));
        assert_eq!(alts.get("E"), Some(&String::new()));
    }

    #[test]
    fn questao_bruta_deserialize_sparse() {
        let json = r#"{"enunciado": "Assinale a alternativa correta.", "gabarito": "B"}"#;
        let q: QuestaoBruta = serde_json::from_str(json).unwrap();
        assert_eq!(q.gabarito.as_deref(), Some("B"));
        assert!(q.numero.is_none());
        assert!(q.classificacao.is_none());
    }
}
