use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;

use provaflow::cli::{Cli, Command};
use provaflow::poller::upload_em_lote;
use provaflow::ui::{self, ProgressoUpload};
use provaflow::{ApiClient, AppStore, ArquivoUpload, Orquestrador, ProvaflowConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    provaflow::logging::init(cli.verbose);

    let config = ProvaflowConfig::load(cli.config.as_deref())?;
    let api = ApiClient::new(&config.api_base_url);

    match cli.command {
        Command::Workflow {
            edital,
            conteudo,
            cargo,
            provas,
        } => executar_workflow(api, &edital, conteudo.as_deref(), cargo.as_deref(), &provas).await,
        Command::Upload { arquivos } => executar_upload(api, &config, &arquivos).await,
    }
}

/// Dirige o workflow de 3 etapas de ponta a ponta.
async fn executar_workflow(
    api: ApiClient,
    edital: &Path,
    conteudo: Option<&Path>,
    cargo: Option<&str>,
    provas: &[PathBuf],
) -> Result<()> {
    let mut orq = Orquestrador::new(api);

    // Etapa 1 — edital.
    orq.receber_edital(vec![ArquivoUpload::ler(edital)?])
        .await
        .context("falha na extração do edital")?;
    if let Some(cargo) = cargo {
        orq.selecionar_cargo(cargo)?;
    }
    if let Some(extraido) = orq.edital() {
        println!(
            "Edital extraído: {} ({} cargos)",
            extraido.nome,
            extraido.cargos.len()
        );
    }
    orq.avancar()?;

    // Etapa 2 — conteúdo programático (opcional; falha não interrompe).
    if let Some(conteudo) = conteudo {
        match orq.receber_conteudo(vec![ArquivoUpload::ler(conteudo)?]).await {
            Ok(()) => {
                if let Some(taxonomia) = orq.taxonomia() {
                    println!(
                        "Conteúdo programático: {} disciplinas identificadas",
                        taxonomia.disciplinas_nomes().len()
                    );
                }
            }
            Err(e) => warn!(erro = %e, "conteúdo programático ignorado"),
        }
    }
    orq.avancar()?;

    // Etapa 3 — provas vinculadas, em um único lote.
    let arquivos = provas
        .iter()
        .map(|p| ArquivoUpload::ler(p))
        .collect::<Result<Vec<_>>>()?;
    orq.receber_provas(arquivos)
        .await
        .context("falha na extração das provas")?;

    let mut store = AppStore::new();
    let resumo = orq.finalizar(&mut store).await?;
    ui::imprimir_resumo(&resumo);
    ui::imprimir_incidencia(&store.incidencia);
    Ok(())
}

/// Envia PDFs avulsos em sequência, acompanhando cada job no terminal.
async fn executar_upload(api: ApiClient, config: &ProvaflowConfig, paths: &[PathBuf]) -> Result<()> {
    let arquivos = paths
        .iter()
        .map(|p| ArquivoUpload::ler(p))
        .collect::<Result<Vec<_>>>()?;

    let progresso = ProgressoUpload::iniciar(arquivos.len());
    let intervalo = Duration::from_millis(config.poll_interval_ms);
    match upload_em_lote(&api, &arquivos, intervalo, |p| progresso.atualizar(p)).await {
        Ok(()) => {
            progresso.concluir();
            Ok(())
        }
        Err(e) => {
            progresso.falhar(&e.to_string());
            Err(e.into())
        }
    }
}
