/// Contadores acumulados de uma instância de MMU.
///
/// Os três contadores são monotônicos: nunca são zerados durante uma
/// simulação e podem ser lidos a qualquer momento, inclusive no meio
/// do fluxo de eventos (a análise por segmentos faz exatamente isso).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MmuStats {
    /// Referências a páginas que não estavam residentes.
    pub page_faults: u64,
    /// Cargas de página a partir do disco (uma por falta).
    pub disk_reads: u64,
    /// Write-backs de páginas sujas despejadas.
    pub disk_writes: u64,
}
