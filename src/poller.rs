//! Job poller and sequential batch uploader.
//!
//! After a raw (non-workflow) PDF upload the backend processes the file
//! asynchronously; this module polls the job status at a fixed interval
//! and remaps job-local progress into the file's slice of the total
//! multi-file progress. Files are processed strictly sequentially, so
//! progress is unambiguous and monotonic across the batch.

use std::time::Duration;

use tokio::time::sleep;
use tracing::debug;

use crate::api::{BackendApi, JobStatus};
use crate::error::PollError;
use crate::model::ArquivoUpload;

/// Default interval between status requests.
pub const INTERVALO_PADRAO: Duration = Duration::from_millis(2000);

/// Fraction of a file's slice reserved for "upload accepted".
const FRACAO_ACEITE: f64 = 0.2;

/// Remap a job-local progress value (0–100) into file `indice`'s slice of
/// the total batch progress.
///
/// The slice for file `i` of `n` is `[i/n, (i+1)/n] × 100`; its first 20%
/// marks upload acceptance and the remaining 80% follows job progress.
pub fn map_progress(indice: usize, total: usize, progresso_job: f64) -> f64 {
    let total = total.max(1) as f64;
    let fatia = 100.0 / total;
    let base = indice as f64 * fatia;
    let job = progresso_job.clamp(0.0, 100.0) / 100.0;
    base + fatia * (FRACAO_ACEITE + (1.0 - FRACAO_ACEITE) * job)
}

/// Poll a job until it reaches a terminal state.
///
/// `on_progress` receives the job-local progress (0–100). The loop is
/// unbounded: it only ends on `completed` (reported as 100), `failed`
/// (server-provided message or a generic fallback) or a transport error.
pub async fn poll_job(
    api: &impl BackendApi,
    job_id: &str,
    intervalo: Duration,
    mut on_progress: impl FnMut(f64),
) -> Result<(), PollError> {
    loop {
        let resposta = api.get_job_status(job_id).await?;
        if resposta.status.is_terminal() {
            if resposta.status == JobStatus::Completed {
                on_progress(100.0);
                return Ok(());
            }
            let mensagem = resposta
                .error
                .unwrap_or_else(|| "Erro no processamento do arquivo".to_string());
            return Err(PollError::JobFalhou(mensagem));
        }
        let progresso = resposta.progress.unwrap_or(0.0).clamp(0.0, 100.0);
        debug!(job_id, progresso, "job em processamento");
        on_progress(progresso);
        sleep(intervalo).await;
    }
}

/// A progress report for the batch uploader.
#[derive(Debug, Clone)]
pub struct ProgressoLote {
    pub arquivo: String,
    pub indice: usize,
    pub total: usize,
    /// Overall batch progress, 0–100.
    pub percentual: f64,
}

/// Upload a list of PDFs one at a time, polling each job to completion.
///
/// Any transport error — on upload or while polling — fails the whole
/// batch immediately; remaining files are not attempted.
pub async fn upload_em_lote(
    api: &impl BackendApi,
    arquivos: &[ArquivoUpload],
    intervalo: Duration,
    mut on_progress: impl FnMut(&ProgressoLote),
) -> Result<(), PollError> {
    let total = arquivos.len();
    for (indice, arquivo) in arquivos.iter().enumerate() {
        let aceito = api.upload_pdf(arquivo).await?;
        on_progress(&ProgressoLote {
            arquivo: arquivo.nome.clone(),
            indice,
            total,
            percentual: map_progress(indice, total, 0.0),
        });

        poll_job(api, &aceito.job_id, intervalo, |progresso_job| {
            on_progress(&ProgressoLote {
                arquivo: arquivo.nome.clone(),
                indice,
                total,
                percentual: map_progress(indice, total, progresso_job),
            });
        })
        .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;
    use crate::api::ApiError;
    use crate::api::types::{
        ConteudoResponse, EditalExtraido, JobStatusResponse, ProjetoRequest, ProjetoResponse,
        ProvasResponse, UploadPdfResponse,
    };
    use crate::model::MIME_PDF;

    fn pdf(nome: &str) -> ArquivoUpload {
        ArquivoUpload::new(nome, MIME_PDF, vec![0x25])
    }

    fn status(s: JobStatus, progress: Option<f64>) -> JobStatusResponse {
        JobStatusResponse {
            status: s,
            progress,
            error: None,
        }
    }

    /// Scripted mock: each poll pops the next status; `None` simulates a
    /// transport failure. Uploads fail after `uploads_ok` acceptances.
    struct MockJobs {
        respostas: RefCell<VecDeque<Option<JobStatusResponse>>>,
        uploads_ok: usize,
        uploads_feitos: RefCell<usize>,
    }

    impl MockJobs {
        fn com(respostas: Vec<Option<JobStatusResponse>>) -> Self {
            Self {
                respostas: RefCell::new(respostas.into()),
                uploads_ok: usize::MAX,
                uploads_feitos: RefCell::new(0),
            }
        }
    }

    fn erro_api() -> ApiError {
        ApiError::Api {
            status: 500,
            message: "boom".into(),
        }
    }

    impl BackendApi for MockJobs {
        async fn upload_edital(&self, _: &ArquivoUpload) -> Result<EditalExtraido, ApiError> {
            unreachable!()
        }

        async fn upload_conteudo_programatico(
            &self,
            _: &str,
            _: &ArquivoUpload,
            _: Option<&str>,
        ) -> Result<ConteudoResponse, ApiError> {
            unreachable!()
        }

        async fn upload_provas_vinculadas(
            &self,
            _: &str,
            _: &[ArquivoUpload],
        ) -> Result<ProvasResponse, ApiError> {
            unreachable!()
        }

        async fn upload_pdf(&self, _: &ArquivoUpload) -> Result<UploadPdfResponse, ApiError> {
            let mut feitos = self.uploads_feitos.borrow_mut();
            if *feitos >= self.uploads_ok {
                return Err(erro_api());
            }
            *feitos += 1;
            Ok(UploadPdfResponse {
                job_id: format!("job-{feitos}"),
            })
        }

        async fn get_job_status(&self, _: &str) -> Result<JobStatusResponse, ApiError> {
            match self.respostas.borrow_mut().pop_front() {
                Some(Some(r)) => Ok(r),
                Some(None) => Err(erro_api()),
                None => panic!("poll além do roteiro"),
            }
        }

        async fn create_projeto(&self, _: &ProjetoRequest) -> Result<ProjetoResponse, ApiError> {
            unreachable!()
        }

        async fn vincular_edital(&self, _: &str, _: &str) -> Result<(), ApiError> {
            unreachable!()
        }
    }

    const RAPIDO: Duration = Duration::from_millis(1);

    #[test]
    fn mapped_progress_stays_within_the_file_slice() {
        for n in 1..=5usize {
            for i in 0..n {
                let inicio = i as f64 / n as f64 * 100.0;
                let fim = (i + 1) as f64 / n as f64 * 100.0;
                for p in [0.0, 10.0, 50.0, 99.0, 100.0] {
                    let mapeado = map_progress(i, n, p);
                    assert!(
                        mapeado >= inicio - 1e-9 && mapeado <= fim + 1e-9,
                        "i={i} n={n} p={p} mapeado={mapeado}"
                    );
                }
            }
        }
    }

    #[test]
    fn acceptance_point_is_twenty_percent_of_the_slice() {
        // Single file: acceptance lands at 20%.
        assert!((map_progress(0, 1, 0.0) - 20.0).abs() < 1e-9);
        // Second of two files: slice [50,100], acceptance at 60%.
        assert!((map_progress(1, 2, 0.0) - 60.0).abs() < 1e-9);
    }

    #[test]
    fn completed_job_reaches_the_slice_end() {
        assert!((map_progress(0, 1, 100.0) - 100.0).abs() < 1e-9);
        assert!((map_progress(0, 2, 100.0) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn out_of_range_job_progress_is_clamped() {
        assert_eq!(map_progress(0, 1, -10.0), map_progress(0, 1, 0.0));
        assert_eq!(map_progress(0, 1, 250.0), map_progress(0, 1, 100.0));
    }

    #[tokio::test]
    async fn polls_until_completed_and_reports_100() {
        let api = MockJobs::com(vec![
            Some(status(JobStatus::Pending, None)),
            Some(status(JobStatus::Processing, Some(40.0))),
            Some(status(JobStatus::Completed, None)),
        ]);
        let mut vistos = Vec::new();
        poll_job(&api, "job-1", RAPIDO, |p| vistos.push(p))
            .await
            .unwrap();
        assert_eq!(vistos, vec![0.0, 40.0, 100.0]);
    }

    #[tokio::test]
    async fn failed_job_surfaces_server_error() {
        let api = MockJobs::com(vec![Some(JobStatusResponse {
            status: JobStatus::Failed,
            progress: None,
            error: Some("página ilegível".into()),
        })]);
        let erro = poll_job(&api, "job-1", RAPIDO, |_| {}).await.unwrap_err();
        assert!(matches!(erro, PollError::JobFalhou(m) if m == "página ilegível"));
    }

    #[tokio::test]
    async fn failed_job_without_message_uses_generic_fallback() {
        let api = MockJobs::com(vec![Some(status(JobStatus::Failed, None))]);
        let erro = poll_job(&api, "job-1", RAPIDO, |_| {}).await.unwrap_err();
        assert!(
            matches!(erro, PollError::JobFalhou(m) if m == "Erro no processamento do arquivo")
        );
    }

    #[tokio::test]
    async fn transport_error_while_polling_is_terminal() {
        let api = MockJobs::com(vec![Some(status(JobStatus::Processing, Some(10.0))), None]);
        let erro = poll_job(&api, "job-1", RAPIDO, |_| {}).await.unwrap_err();
        assert!(matches!(erro, PollError::Api(_)));
    }

    #[tokio::test]
    async fn batch_progress_is_monotonic_across_files() {
        let api = MockJobs::com(vec![
            Some(status(JobStatus::Processing, Some(50.0))),
            Some(status(JobStatus::Completed, None)),
            Some(status(JobStatus::Processing, Some(30.0))),
            Some(status(JobStatus::Completed, None)),
        ]);
        let arquivos = vec![pdf("a.pdf"), pdf("b.pdf")];
        let mut percentuais = Vec::new();
        upload_em_lote(&api, &arquivos, RAPIDO, |p| percentuais.push(p.percentual))
            .await
            .unwrap();

        assert!(percentuais.windows(2).all(|w| w[0] <= w[1]));
        assert!((percentuais.last().unwrap() - 100.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn upload_failure_aborts_remaining_files() {
        let mut api = MockJobs::com(vec![
            Some(status(JobStatus::Completed, None)),
        ]);
        api.uploads_ok = 1;
        let arquivos = vec![pdf("a.pdf"), pdf("b.pdf"), pdf("c.pdf")];
        let erro = upload_em_lote(&api, &arquivos, RAPIDO, |_| {})
            .await
            .unwrap_err();
        assert!(matches!(erro, PollError::Api(_)));
        // Only the first file was accepted; the failure on the second
        // stopped the batch before the third.
        assert_eq!(*api.uploads_feitos.borrow(), 1);
    }
}
