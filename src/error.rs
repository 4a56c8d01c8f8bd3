use thiserror::Error;

use crate::api::ApiError;

/// Erros do orquestrador de workflow.
///
/// Erros de validação bloqueiam a ação sem contatar a rede; erros de
/// transporte deixam a etapa em estado retentável.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Nenhum PDF na seleção — rejeição total, sem aceitação parcial.
    #[error("Apenas arquivos PDF são aceitos")]
    ArquivoNaoPdf,

    /// As etapas 1 e 2 aceitam exatamente um arquivo.
    #[error("Envie exatamente um arquivo PDF")]
    ArquivoUnicoEsperado,

    /// Há mais de um cargo candidato e nenhum foi selecionado.
    #[error("Selecione um cargo antes de avançar")]
    CargoNaoSelecionado,

    /// A etapa exige um edital já extraído.
    #[error("Envie o edital antes desta etapa")]
    EditalAusente,

    /// O cargo informado não consta na lista de candidatos do edital.
    #[error("Cargo não consta no edital")]
    CargoInvalido,

    /// Um upload está em andamento; a ação foi recusada.
    #[error("Aguarde o término do upload em andamento")]
    UploadEmAndamento,

    /// A operação pertence a outra etapa do workflow.
    #[error("Ação indisponível na etapa atual")]
    EtapaIncorreta,

    /// Nenhum arquivo do último lote foi processado com sucesso.
    #[error("Nenhuma prova foi processada com sucesso")]
    SemResultados,

    /// Navegação fora dos limites (avançar na última etapa, voltar na primeira).
    #[error("Navegação inválida a partir da etapa atual")]
    NavegacaoInvalida,

    /// Falha de transporte ou resposta de erro do backend.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Erros do poller de jobs.
#[derive(Debug, Error)]
pub enum PollError {
    /// O backend reportou o job como falho. Contém a mensagem do servidor
    /// ou um fallback genérico.
    #[error("processamento falhou: {0}")]
    JobFalhou(String),

    /// Falha de transporte durante a consulta — termina o lote inteiro.
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_facing_messages_are_portuguese() {
        assert_eq!(
            WorkflowError::ArquivoNaoPdf.to_string(),
            "Apenas arquivos PDF são aceitos"
        );
        assert_eq!(
            WorkflowError::EtapaIncorreta.to_string(),
            "Ação indisponível na etapa atual"
        );
        assert_eq!(
            PollError::JobFalhou("PDF ilegível".into()).to_string(),
            "processamento falhou: PDF ilegível"
        );
    }
}
