use std::time::Duration;

use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::types::{
    ConteudoResponse, EditalExtraido, JobStatusResponse, ProjetoRequest, ProjetoResponse,
    ProvasResponse, UploadPdfResponse, VincularEditalRequest,
};
use crate::model::ArquivoUpload;

/// Superfície da API do backend consumida pelo orquestrador e pelo poller.
///
/// Implementada por [`ApiClient`] para chamadas reais e por mocks nos testes.
pub trait BackendApi {
    async fn upload_edital(&self, arquivo: &ArquivoUpload) -> Result<EditalExtraido, ApiError>;

    async fn upload_conteudo_programatico(
        &self,
        edital_id: &str,
        arquivo: &ArquivoUpload,
        cargo: Option<&str>,
    ) -> Result<ConteudoResponse, ApiError>;

    async fn upload_provas_vinculadas(
        &self,
        edital_id: &str,
        arquivos: &[ArquivoUpload],
    ) -> Result<ProvasResponse, ApiError>;

    async fn upload_pdf(&self, arquivo: &ArquivoUpload) -> Result<UploadPdfResponse, ApiError>;

    async fn get_job_status(&self, job_id: &str) -> Result<JobStatusResponse, ApiError>;

    async fn create_projeto(&self, req: &ProjetoRequest) -> Result<ProjetoResponse, ApiError>;

    async fn vincular_edital(&self, projeto_id: &str, edital_id: &str) -> Result<(), ApiError>;
}

/// Cliente HTTP para os endpoints de extração e classificação do backend.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Cria um cliente apontando para a URL base informada.
    ///
    /// Uploads de PDF podem demorar; o timeout de requisição é generoso
    /// enquanto o de conexão permanece curto.
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(300))
            .build()
            .expect("failed to build HTTP client");
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn pdf_part(arquivo: &ArquivoUpload) -> Result<Part, ApiError> {
        let part = Part::bytes(arquivo.dados.clone())
            .file_name(arquivo.nome.clone())
            .mime_str(&arquivo.mime)?;
        Ok(part)
    }
}

/// Converte uma resposta HTTP em JSON tipado, mapeando status não-2xx
/// para [`ApiError::Api`] com o corpo como mensagem.
async fn into_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "erro desconhecido".to_string());
        return Err(ApiError::Api {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response.json::<T>().await?)
}

impl BackendApi for ApiClient {
    async fn upload_edital(&self, arquivo: &ArquivoUpload) -> Result<EditalExtraido, ApiError> {
        let form = Form::new().part("file", Self::pdf_part(arquivo)?);
        let response = self
            .client
            .post(self.url("/editais/upload"))
            .multipart(form)
            .send()
            .await?;
        into_json(response).await
    }

    async fn upload_conteudo_programatico(
        &self,
        edital_id: &str,
        arquivo: &ArquivoUpload,
        cargo: Option<&str>,
    ) -> Result<ConteudoResponse, ApiError> {
        let mut form = Form::new().part("file", Self::pdf_part(arquivo)?);
        if let Some(cargo) = cargo {
            form = form.text("cargo", cargo.to_string());
        }
        let response = self
            .client
            .post(self.url(&format!("/editais/{edital_id}/conteudo-programatico")))
            .multipart(form)
            .send()
            .await?;
        into_json(response).await
    }

    async fn upload_provas_vinculadas(
        &self,
        edital_id: &str,
        arquivos: &[ArquivoUpload],
    ) -> Result<ProvasResponse, ApiError> {
        let mut form = Form::new();
        for arquivo in arquivos {
            form = form.part("files", Self::pdf_part(arquivo)?);
        }
        let response = self
            .client
            .post(self.url(&format!("/editais/{edital_id}/provas")))
            .multipart(form)
            .send()
            .await?;
        into_json(response).await
    }

    async fn upload_pdf(&self, arquivo: &ArquivoUpload) -> Result<UploadPdfResponse, ApiError> {
        let form = Form::new().part("file", Self::pdf_part(arquivo)?);
        let response = self
            .client
            .post(self.url("/upload"))
            .multipart(form)
            .send()
            .await?;
        into_json(response).await
    }

    async fn get_job_status(&self, job_id: &str) -> Result<JobStatusResponse, ApiError> {
        let response = self
            .client
            .get(self.url(&format!("/jobs/{job_id}")))
            .send()
            .await?;
        into_json(response).await
    }

    async fn create_projeto(&self, req: &ProjetoRequest) -> Result<ProjetoResponse, ApiError> {
        let response = self
            .client
            .post(self.url("/projetos"))
            .json(req)
            .send()
            .await?;
        into_json(response).await
    }

    async fn vincular_edital(&self, projeto_id: &str, edital_id: &str) -> Result<(), ApiError> {
        let body = VincularEditalRequest {
            edital_id: edital_id.to_string(),
        };
        let response = self
            .client
            .post(self.url(&format!("/projetos/{projeto_id}/vincular-edital")))
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "erro desconhecido".to_string());
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:8000/");
        assert_eq!(client.url("/jobs/abc"), "http://localhost:8000/jobs/abc");
    }
}
