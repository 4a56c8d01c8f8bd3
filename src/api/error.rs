//! Tipos de erro para o cliente da API do backend.
//!
//! Define [`ApiError`] com variantes para erros HTTP e falhas de rede.
//! Usa `thiserror` para derivar `Display` e `Error` automaticamente
//! a partir dos atributos `#[error(...)]`.

use thiserror::Error;

/// Erros que podem ocorrer ao interagir com a API do backend.
///
/// As variantes cobrem os dois cenários de falha de transporte:
/// - [`Api`](ApiError::Api) — o servidor respondeu com status não-2xx
/// - [`Network`](ApiError::Network) — falha na camada de rede
#[derive(Debug, Error)]
pub enum ApiError {
    /// Erro retornado pela API (ex.: 422 arquivo ilegível, 500 erro interno).
    /// Contém o código de status HTTP e a mensagem do corpo da resposta.
    #[error("erro da API (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Falha de rede subjacente (DNS, conexão recusada, timeout).
    /// Encapsula o erro original do `reqwest` via `#[from]`.
    #[error("erro de rede: {0}")]
    Network(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display() {
        let err = ApiError::Api {
            status: 422,
            message: "arquivo não é um PDF válido".into(),
        };
        assert_eq!(
            err.to_string(),
            "erro da API (status 422): arquivo não é um PDF válido"
        );
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ApiError>();
    }
}
