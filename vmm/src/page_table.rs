use std::collections::HashMap;

/// Identificador de página virtual. O driver deriva o número da página
/// a partir do endereço; para a biblioteca ele é opaco.
pub type PageId = usize;

/// Uma entrada da tabela de páginas.
#[derive(Copy, Clone, Default, Debug)]
pub struct PageTableEntry {
    /// Frame dono da página, se residente.
    pub frame: Option<usize>,
    /// A página está residente agora?
    pub valid: bool,
    /// Modificada desde a última carga.
    pub dirty: bool,
    /// Acessada desde a última limpeza do bit (quem limpa é o clock).
    pub referenced: bool,
}

/// Tabela de páginas simulada.
///
/// Uma entrada nasce na primeira falta da página e nunca mais sai da
/// tabela: o despejo só a marca inválida, e a recarga sobrescreve os
/// campos por inteiro.
pub struct PageTable {
    table: HashMap<PageId, PageTableEntry>,
}

impl PageTable {
    pub fn new() -> Self {
        PageTable {
            table: HashMap::new(),
        }
    }

    /// Instala (ou sobrescreve por completo) a entrada de `page`,
    /// recém-carregada no frame dado.
    pub fn set(&mut self, page: PageId, frame: usize, dirty: bool) {
        let entry = PageTableEntry {
            frame: Some(frame),
            valid: true,
            dirty,
            referenced: true,
        };

        self.table.insert(page, entry);
    }

    pub fn get(&self, page: PageId) -> Option<&PageTableEntry> {
        self.table.get(&page)
    }

    pub fn get_mut(&mut self, page: PageId) -> Option<&mut PageTableEntry> {
        self.table.get_mut(&page)
    }

    /// Quantas entradas estão válidas, isto é, residentes.
    pub fn resident_count(&self) -> usize {
        self.table.values().filter(|entry| entry.valid).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_installs_fresh_entry() {
        let mut table = PageTable::new();
        table.set(0xCA, 3, true);

        let entry = table.get(0xCA).unwrap();
        assert_eq!(entry.frame, Some(3));
        assert!(entry.valid);
        assert!(entry.dirty);
        assert!(entry.referenced);
    }

    #[test]
    fn set_overwrites_every_field() {
        let mut table = PageTable::new();
        table.set(0xCA, 3, true);

        // Simula o despejo: inválida, sem frame, sem bit de uso.
        let entry = table.get_mut(0xCA).unwrap();
        entry.valid = false;
        entry.frame = None;
        entry.referenced = false;

        // A recarga limpa inclusive o dirty antigo.
        table.set(0xCA, 1, false);

        let entry = table.get(0xCA).unwrap();
        assert_eq!(entry.frame, Some(1));
        assert!(entry.valid);
        assert!(!entry.dirty);
        assert!(entry.referenced);
    }

    #[test]
    fn resident_count_ignores_invalid_entries() {
        let mut table = PageTable::new();
        table.set(0xA, 0, false);
        table.set(0xB, 1, false);

        assert_eq!(table.resident_count(), 2);

        table.get_mut(0xA).unwrap().valid = false;
        assert_eq!(table.resident_count(), 1);

        // A entrada inválida continua consultável.
        assert!(table.get(0xA).is_some());
    }
}
