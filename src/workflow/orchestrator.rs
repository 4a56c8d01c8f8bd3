use tracing::{info, warn};

use super::assemble::{ContextoMontagem, montar_questoes};
use super::state::{Etapa, StatusEtapa};
use crate::api::BackendApi;
use crate::api::types::{EditalExtraido, ProjetoRequest, ResultadoExtracao, TaxonomiaExtraida};
use crate::error::WorkflowError;
use crate::incidence::construir_incidencia;
use crate::model::ArquivoUpload;
use crate::store::AppStore;

/// Summary returned to the caller after a successful finish.
#[derive(Debug, Clone)]
pub struct ResumoFinal {
    pub edital_nome: String,
    /// Sum of each successful result's reported question total.
    pub total_questoes: u32,
    pub arquivos_com_sucesso: usize,
    /// Questions actually assembled and committed to the store.
    pub questoes_montadas: usize,
}

/// Drives the 3-step edital upload workflow.
///
/// Step 1 extracts the edital, step 2 optionally extracts the syllabus,
/// step 3 accumulates exam files and batches them through extraction.
/// All entities are transient until [`finalizar`](Orquestrador::finalizar)
/// commits them to the [`AppStore`].
pub struct Orquestrador<C: BackendApi> {
    api: C,
    etapa: Etapa,
    status_edital: StatusEtapa,
    status_conteudo: StatusEtapa,
    status_provas: StatusEtapa,
    erro_edital: Option<String>,
    erro_conteudo: Option<String>,
    erro_provas: Option<String>,
    edital: Option<EditalExtraido>,
    cargo_selecionado: Option<String>,
    taxonomia: Option<TaxonomiaExtraida>,
    arquivos_provas: Vec<ArquivoUpload>,
    resultados: Vec<ResultadoExtracao>,
}

impl<C: BackendApi> Orquestrador<C> {
    pub fn new(api: C) -> Self {
        Self {
            api,
            etapa: Etapa::Edital,
            status_edital: StatusEtapa::Ociosa,
            status_conteudo: StatusEtapa::Ociosa,
            status_provas: StatusEtapa::Ociosa,
            erro_edital: None,
            erro_conteudo: None,
            erro_provas: None,
            edital: None,
            cargo_selecionado: None,
            taxonomia: None,
            arquivos_provas: Vec::new(),
            resultados: Vec::new(),
        }
    }

    pub fn etapa(&self) -> Etapa {
        self.etapa
    }

    /// Whether any step currently has an upload in flight.
    pub fn em_upload(&self) -> bool {
        self.status_edital.em_andamento()
            || self.status_conteudo.em_andamento()
            || self.status_provas.em_andamento()
    }

    pub fn status(&self, etapa: Etapa) -> StatusEtapa {
        match etapa {
            Etapa::Edital => self.status_edital,
            Etapa::ConteudoProgramatico => self.status_conteudo,
            Etapa::Provas => self.status_provas,
        }
    }

    /// The active error for a step, if any. A new action on the step
    /// clears it; errors never auto-dismiss.
    pub fn erro(&self, etapa: Etapa) -> Option<&str> {
        match etapa {
            Etapa::Edital => self.erro_edital.as_deref(),
            Etapa::ConteudoProgramatico => self.erro_conteudo.as_deref(),
            Etapa::Provas => self.erro_provas.as_deref(),
        }
    }

    pub fn edital(&self) -> Option<&EditalExtraido> {
        self.edital.as_ref()
    }

    pub fn cargo_selecionado(&self) -> Option<&str> {
        self.cargo_selecionado.as_deref()
    }

    pub fn taxonomia(&self) -> Option<&TaxonomiaExtraida> {
        self.taxonomia.as_ref()
    }

    pub fn resultados(&self) -> &[ResultadoExtracao] {
        &self.resultados
    }

    /// Step 1: receive the edital PDF and extract it.
    ///
    /// Only accepted while the workflow is at step 1. Exactly one PDF is
    /// accepted; non-PDF selections are rejected with no state change.
    /// When the extracted edital carries a single cargo candidate, it is
    /// auto-selected.
    pub async fn receber_edital(
        &mut self,
        arquivos: Vec<ArquivoUpload>,
    ) -> Result<(), WorkflowError> {
        if self.em_upload() {
            return Err(WorkflowError::UploadEmAndamento);
        }
        if self.etapa != Etapa::Edital {
            return Err(WorkflowError::EtapaIncorreta);
        }
        let pdfs = apenas_pdfs(arquivos).map_err(|e| self.registrar_edital(e))?;
        let [arquivo] = <[_; 1]>::try_from(pdfs)
            .map_err(|_| self.registrar_edital(WorkflowError::ArquivoUnicoEsperado))?;

        self.erro_edital = None;
        self.status_edital = StatusEtapa::Enviando;

        let resultado = self.api.upload_edital(&arquivo).await;

        match resultado {
            Ok(edital) => {
                if edital.cargos.len() == 1 {
                    self.cargo_selecionado = Some(edital.cargos[0].clone());
                }
                info!(edital_id = %edital.edital_id, cargos = edital.cargos.len(), "edital extraído");
                self.edital = Some(edital);
                self.status_edital = StatusEtapa::Extraida;
                Ok(())
            }
            Err(e) => {
                self.status_edital = StatusEtapa::Erro;
                self.erro_edital = Some("Erro ao processar o edital. Tente novamente.".into());
                Err(e.into())
            }
        }
    }

    /// Select one of the edital's cargo candidates.
    pub fn selecionar_cargo(&mut self, cargo: &str) -> Result<(), WorkflowError> {
        let edital = self.edital.as_ref().ok_or(WorkflowError::EditalAusente)?;
        if !edital.cargos.iter().any(|c| c == cargo) {
            return Err(self.registrar_edital(WorkflowError::CargoInvalido));
        }
        self.erro_edital = None;
        self.cargo_selecionado = Some(cargo.to_string());
        Ok(())
    }

    /// Advance to the next step, enforcing the step's preconditions.
    ///
    /// Leaving step 1 requires an extracted edital and, when more than one
    /// cargo candidate exists, a selection. Step 2's advance is always
    /// available — it becomes a skip when nothing was uploaded.
    pub fn avancar(&mut self) -> Result<Etapa, WorkflowError> {
        if self.em_upload() {
            return Err(WorkflowError::UploadEmAndamento);
        }
        match self.etapa {
            Etapa::Edital => {
                let multiplos_cargos = match self.edital.as_ref() {
                    None => return Err(self.registrar_edital(WorkflowError::EditalAusente)),
                    Some(edital) => edital.cargos.len() > 1,
                };
                if multiplos_cargos && self.cargo_selecionado.is_none() {
                    return Err(self.registrar_edital(WorkflowError::CargoNaoSelecionado));
                }
                self.erro_edital = None;
            }
            Etapa::ConteudoProgramatico => {
                if self.status_conteudo == StatusEtapa::Ociosa {
                    self.status_conteudo = StatusEtapa::Pulada;
                }
            }
            Etapa::Provas => return Err(WorkflowError::NavegacaoInvalida),
        }
        self.etapa = self.etapa.proxima().expect("checked above");
        info!(etapa = %self.etapa, numero = self.etapa.numero(), "etapa avançada");
        Ok(self.etapa)
    }

    /// Go back one step. Extracted data is kept.
    pub fn voltar(&mut self) -> Result<Etapa, WorkflowError> {
        if self.em_upload() {
            return Err(WorkflowError::UploadEmAndamento);
        }
        self.etapa = self.etapa.anterior().ok_or(WorkflowError::NavegacaoInvalida)?;
        Ok(self.etapa)
    }

    /// Step 2 (optional): receive the conteúdo programático PDF.
    ///
    /// Only accepted while the workflow is at step 2, which guarantees
    /// the step-1 gate already ran. Passes the selected cargo along.
    /// Failure is non-fatal to workflow progression.
    pub async fn receber_conteudo(
        &mut self,
        arquivos: Vec<ArquivoUpload>,
    ) -> Result<(), WorkflowError> {
        if self.em_upload() {
            return Err(WorkflowError::UploadEmAndamento);
        }
        if self.etapa != Etapa::ConteudoProgramatico {
            return Err(WorkflowError::EtapaIncorreta);
        }
        let edital_id = match self.edital.as_ref() {
            Some(e) => e.edital_id.clone(),
            None => return Err(self.registrar_conteudo(WorkflowError::EditalAusente)),
        };
        let pdfs = apenas_pdfs(arquivos)
            .map_err(|e| self.registrar_conteudo(e))?;
        let [arquivo] = <[_; 1]>::try_from(pdfs)
            .map_err(|_| self.registrar_conteudo(WorkflowError::ArquivoUnicoEsperado))?;

        self.erro_conteudo = None;
        self.status_conteudo = StatusEtapa::Enviando;

        let resultado = self
            .api
            .upload_conteudo_programatico(&edital_id, &arquivo, self.cargo_selecionado.as_deref())
            .await;

        match resultado {
            Ok(resp) => {
                // Absence of a taxonomy in the response is valid.
                self.taxonomia = resp.taxonomia;
                self.status_conteudo = StatusEtapa::Extraida;
                Ok(())
            }
            Err(e) => {
                self.status_conteudo = StatusEtapa::Erro;
                self.erro_conteudo = Some(
                    "Erro ao processar o conteúdo programático. Tente novamente ou pule esta etapa."
                        .into(),
                );
                Err(e.into())
            }
        }
    }

    /// Step 3: receive one or more exam PDFs.
    ///
    /// Only accepted while the workflow is at step 3, so the step-1 gate
    /// (extracted edital, cargo selected when needed) cannot be bypassed.
    /// Accepted files are appended to the running list (no deduplication)
    /// and a single batched extraction call covers the full accumulated
    /// list. Mixed selections are filtered to PDFs; an all-non-PDF
    /// selection is rejected with no partial acceptance.
    pub async fn receber_provas(
        &mut self,
        arquivos: Vec<ArquivoUpload>,
    ) -> Result<(), WorkflowError> {
        if self.em_upload() {
            return Err(WorkflowError::UploadEmAndamento);
        }
        if self.etapa != Etapa::Provas {
            return Err(WorkflowError::EtapaIncorreta);
        }
        let edital_id = match self.edital.as_ref() {
            Some(e) => e.edital_id.clone(),
            None => return Err(self.registrar_provas(WorkflowError::EditalAusente)),
        };
        let pdfs = apenas_pdfs(arquivos).map_err(|e| self.registrar_provas(e))?;

        self.erro_provas = None;
        self.arquivos_provas.extend(pdfs);
        self.status_provas = StatusEtapa::Enviando;

        let resultado = self
            .api
            .upload_provas_vinculadas(&edital_id, &self.arquivos_provas)
            .await;

        match resultado {
            Ok(resp) => {
                self.resultados = resp.results;
                self.status_provas = StatusEtapa::ResultadosParciais;
                Ok(())
            }
            Err(e) => {
                // The accumulated files are kept so a retry re-sends the batch.
                self.status_provas = StatusEtapa::Erro;
                self.erro_provas = Some("Erro ao processar as provas. Tente novamente.".into());
                Err(e.into())
            }
        }
    }

    /// Whether the finish transition is enabled: the workflow is at step 3
    /// and at least one file in the latest result set succeeded.
    pub fn pode_finalizar(&self) -> bool {
        self.etapa == Etapa::Provas
            && !self.em_upload()
            && self.resultados.iter().any(|r| r.success)
    }

    /// The finish transition: assemble questions, create/link the backend
    /// projeto (failure logged and swallowed), build the incidence tree,
    /// commit everything to the store and reset the workflow.
    ///
    /// Triggered only from step 3.
    pub async fn finalizar(&mut self, store: &mut AppStore) -> Result<ResumoFinal, WorkflowError> {
        if self.etapa != Etapa::Provas {
            return Err(WorkflowError::EtapaIncorreta);
        }
        if !self.pode_finalizar() {
            return Err(WorkflowError::SemResultados);
        }
        let edital = self.edital.clone().ok_or(WorkflowError::EditalAusente)?;

        let ctx = ContextoMontagem {
            edital: Some(&edital),
            cargo_selecionado: self.cargo_selecionado.as_deref(),
        };
        let montagem = montar_questoes(&self.resultados, &ctx);

        // Project creation/link is a non-critical side effect: it must
        // never block the local commit.
        self.criar_projeto(&edital).await;

        let incidencia = construir_incidencia(&montagem.questoes);
        let resumo = ResumoFinal {
            edital_nome: edital.nome.clone(),
            total_questoes: montagem.total_questoes,
            arquivos_com_sucesso: montagem.arquivos_com_sucesso,
            questoes_montadas: montagem.questoes.len(),
        };
        store.commit(edital, montagem.questoes, incidencia);

        self.reiniciar();
        Ok(resumo)
    }

    async fn criar_projeto(&self, edital: &EditalExtraido) {
        let req = ProjetoRequest {
            nome: edital.nome.clone(),
            banca: edital.banca.clone(),
            cargo: self.cargo_selecionado.clone(),
            ano: edital.ano,
        };
        match self.api.create_projeto(&req).await {
            Ok(projeto) => {
                if let Err(e) = self.api.vincular_edital(&projeto.id, &edital.edital_id).await {
                    warn!(erro = %e, projeto_id = %projeto.id, "falha ao vincular edital ao projeto");
                }
            }
            Err(e) => warn!(erro = %e, "falha ao criar projeto"),
        }
    }

    /// Close the workflow, discarding transient state.
    ///
    /// Refused (returns `false`) while an upload is in flight.
    pub fn fechar(&mut self) -> bool {
        if self.em_upload() {
            return false;
        }
        self.reiniciar();
        true
    }

    fn reiniciar(&mut self) {
        self.etapa = Etapa::Edital;
        self.status_edital = StatusEtapa::Ociosa;
        self.status_conteudo = StatusEtapa::Ociosa;
        self.status_provas = StatusEtapa::Ociosa;
        self.erro_edital = None;
        self.erro_conteudo = None;
        self.erro_provas = None;
        self.edital = None;
        self.cargo_selecionado = None;
        self.taxonomia = None;
        self.arquivos_provas.clear();
        self.resultados.clear();
    }

    fn registrar_edital(&mut self, e: WorkflowError) -> WorkflowError {
        self.erro_edital = Some(e.to_string());
        e
    }

    fn registrar_conteudo(&mut self, e: WorkflowError) -> WorkflowError {
        self.erro_conteudo = Some(e.to_string());
        e
    }

    fn registrar_provas(&mut self, e: WorkflowError) -> WorkflowError {
        self.erro_provas = Some(e.to_string());
        e
    }
}

/// Filter a selection down to PDFs. An all-non-PDF selection is a
/// validation error with no partial acceptance.
fn apenas_pdfs(arquivos: Vec<ArquivoUpload>) -> Result<Vec<ArquivoUpload>, WorkflowError> {
    let pdfs: Vec<ArquivoUpload> = arquivos.into_iter().filter(ArquivoUpload::is_pdf).collect();
    if pdfs.is_empty() {
        return Err(WorkflowError::ArquivoNaoPdf);
    }
    Ok(pdfs)
}
