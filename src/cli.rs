//! Interface de linha de comando do provaflow baseada em clap.
//!
//! Define a struct [`Cli`] com subcomandos [`Command`] (workflow, upload)
//! e flags globais (--config, --verbose).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// provaflow — upload e classificação de provas de concurso.
#[derive(Debug, Parser)]
#[command(name = "provaflow", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Caminho para o arquivo de configuração TOML.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Habilita saída detalhada (verbose).
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Executa o workflow completo: edital → conteúdo programático → provas.
    Workflow {
        /// PDF do edital (etapa 1).
        #[arg(long)]
        edital: PathBuf,

        /// PDF do conteúdo programático (etapa 2, opcional).
        #[arg(long)]
        conteudo: Option<PathBuf>,

        /// Cargo a selecionar quando o edital tem mais de um candidato.
        #[arg(long)]
        cargo: Option<String>,

        /// PDFs das provas vinculadas (etapa 3).
        #[arg(long, required = true, num_args = 1..)]
        provas: Vec<PathBuf>,
    },

    /// Envia PDFs avulsos e acompanha o processamento assíncrono.
    Upload {
        /// Arquivos PDF a enviar, processados em sequência.
        #[arg(required = true)]
        arquivos: Vec<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_workflow_subcommand() {
        let cli = Cli::parse_from([
            "provaflow",
            "workflow",
            "--edital",
            "edital.pdf",
            "--cargo",
            "Analista",
            "--provas",
            "p1.pdf",
            "p2.pdf",
        ]);
        match cli.command {
            Command::Workflow {
                edital,
                conteudo,
                cargo,
                provas,
            } => {
                assert_eq!(edital, PathBuf::from("edital.pdf"));
                assert!(conteudo.is_none());
                assert_eq!(cargo.as_deref(), Some("Analista"));
                assert_eq!(provas.len(), 2);
            }
            _ => panic!("expected Workflow command"),
        }
    }

    #[test]
    fn cli_parses_upload_subcommand() {
        let cli = Cli::parse_from(["provaflow", "upload", "a.pdf", "b.pdf"]);
        match cli.command {
            Command::Upload { arquivos } => assert_eq!(arquivos.len(), 2),
            _ => panic!("expected Upload command"),
        }
    }

    #[test]
    fn cli_parses_global_flags() {
        let cli = Cli::parse_from([
            "provaflow",
            "--config",
            "custom.toml",
            "--verbose",
            "upload",
            "a.pdf",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    }

    #[test]
    fn cli_verify() {
        Cli::command().debug_assert();
    }
}
