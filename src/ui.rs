//! Interface de terminal do provaflow — barra de progresso e saída colorida.
//!
//! Usa as crates `indicatif` para a barra de progresso do lote e `console`
//! para estilização com cores. O [`ProgressoUpload`] acompanha visualmente
//! o envio sequencial de arquivos no terminal.

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::incidence::IncidenciaNode;
use crate::poller::ProgressoLote;
use crate::workflow::ResumoFinal;

/// Indicador visual de progresso para o envio de um lote de PDFs.
///
/// Exibe uma barra de 0 a 100 acompanhando o mapeamento de progresso do
/// poller e mensagens coloridas para sucesso (verde) e falha (vermelho).
pub struct ProgressoUpload {
    // Barra de progresso do indicatif, em percentual do lote inteiro.
    pb: ProgressBar,
    // Estilo verde para mensagens de sucesso.
    green: Style,
    // Estilo vermelho para mensagens de falha.
    red: Style,
}

impl ProgressoUpload {
    /// Inicia a barra para um lote com o número de arquivos informado.
    pub fn iniciar(total_arquivos: usize) -> Self {
        let pb = ProgressBar::new(100);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40.cyan/blue} {percent:>3}% {msg}")
                .expect("invalid template"),
        );
        pb.set_message(format!("0/{total_arquivos} arquivos"));

        Self {
            pb,
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
        }
    }

    /// Atualiza a barra com um relatório do poller.
    pub fn atualizar(&self, progresso: &ProgressoLote) {
        self.pb.set_position(progresso.percentual.round() as u64);
        self.pb.set_message(format!(
            "{}/{} — {}",
            progresso.indice + 1,
            progresso.total,
            progresso.arquivo
        ));
    }

    /// Finaliza a barra com sucesso.
    pub fn concluir(&self) {
        self.pb.finish_and_clear();
        println!("  {} Todos os arquivos processados", self.green.apply_to("✓"));
    }

    /// Finaliza a barra com a mensagem de falha.
    pub fn falhar(&self, mensagem: &str) {
        self.pb.finish_and_clear();
        println!("  {} {mensagem}", self.red.apply_to("✗"));
    }
}

/// Imprime o resumo final do workflow.
pub fn imprimir_resumo(resumo: &ResumoFinal) {
    let green = Style::new().green().bold();
    println!();
    println!("{}", green.apply_to("─── Workflow concluído ───"));
    println!("Edital: {}", resumo.edital_nome);
    println!(
        "Arquivos com sucesso: {} | Questões reportadas: {} | Questões montadas: {}",
        resumo.arquivos_com_sucesso, resumo.total_questoes, resumo.questoes_montadas
    );
}

/// Imprime a árvore de incidência com contagens e percentuais.
pub fn imprimir_incidencia(arvore: &[IncidenciaNode]) {
    if arvore.is_empty() {
        return;
    }
    let bold = Style::new().bold();
    println!();
    println!("{}", bold.apply_to("─── Incidência por disciplina ───"));
    for no in arvore {
        imprimir_no(no, 0);
    }
}

fn imprimir_no(no: &IncidenciaNode, nivel: usize) {
    let recuo = "  ".repeat(nivel);
    println!(
        "{recuo}{} — {} ({:.1}%)",
        no.nome, no.quantidade, no.percentual
    );
    if let Some(filhos) = &no.filhos {
        for filho in filhos {
            imprimir_no(filho, nivel + 1);
        }
    }
}
