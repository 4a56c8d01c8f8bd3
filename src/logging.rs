//! Inicialização do tracing para o binário.

use tracing_subscriber::EnvFilter;

/// Inicializa o subscriber global. `RUST_LOG` tem precedência; sem ela,
/// `--verbose` habilita `debug`, caso contrário `info`.
pub fn init(verbose: bool) {
    let padrao = if verbose { "provaflow=debug" } else { "provaflow=info" };
    let filtro = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(padrao));
    tracing_subscriber::fmt()
        .with_env_filter(filtro)
        .with_target(false)
        .init();
}
