use log::debug;

use crate::error::{Error, Result};
use crate::frame_pool::FramePool;
use crate::page_replacer::{PageEvent, PageReplacer};
use crate::page_table::{PageId, PageTable};
use crate::stats::MmuStats;

/// A MMU simulada: pool de frames + tabela de páginas + política.
///
/// Uma instância resolve uma referência por vez, por completo (hit, ou
/// falta com despejo e carga), antes de aceitar a próxima. Todo o
/// estado é próprio da instância, inclusive o modo debug -- nada de
/// flag global de processo.
pub struct Mmu<R: PageReplacer> {
    pool: FramePool,
    table: PageTable,
    replacer: R,
    stats: MmuStats,
    debug: bool,
}

impl<R: PageReplacer> Mmu<R> {
    /// Constrói uma MMU com `num_frames` frames físicos.
    pub fn new(num_frames: usize, replacer: R) -> Result<Self> {
        if num_frames == 0 {
            return Err(Error::InvalidFrameCount(num_frames));
        }

        Ok(Mmu {
            pool: FramePool::new(num_frames),
            table: PageTable::new(),
            replacer,
            stats: MmuStats::default(),
            debug: false,
        })
    }

    pub fn read(&mut self, page: PageId) {
        self.access(page, false);
    }

    pub fn write(&mut self, page: PageId) {
        self.access(page, true);
    }

    /// Contadores acumulados até aqui.
    pub fn stats(&self) -> MmuStats {
        self.stats
    }

    /// Liga ou desliga o rastreio por evento. Só observação: nenhum
    /// contador nem decisão de política muda com isso.
    pub fn set_debug(&mut self, enabled: bool) {
        self.debug = enabled;
    }

    pub fn num_frames(&self) -> usize {
        self.pool.len()
    }

    pub fn resident_count(&self) -> usize {
        self.pool.occupied_count()
    }

    pub fn page_table(&self) -> &PageTable {
        &self.table
    }

    pub fn frame_pool(&self) -> &FramePool {
        &self.pool
    }

    fn access(&mut self, page: PageId, is_write: bool) {
        if let Some(entry) = self.table.get_mut(page) {
            if entry.valid {
                // Hit: só os bits mudam, nenhum contador.
                entry.referenced = true;
                if is_write {
                    entry.dirty = true;
                }

                if self.debug {
                    debug!(
                        "mmu: {} hit página {:#06X} no frame {:?}",
                        if is_write { "write" } else { "read" },
                        page,
                        entry.frame,
                    );
                }

                self.replacer.page_event(PageEvent::Touched(page));
                return;
            }
        }

        if self.debug {
            debug!(
                "mmu: {} miss página {:#06X}, tratando falta",
                if is_write { "write" } else { "read" },
                page,
            );
        }

        self.handle_page_fault(page, is_write);
    }

    /// Protocolo de falta compartilhado pelas três políticas: frame
    /// livre se houver, senão despejo; depois a carga.
    fn handle_page_fault(&mut self, page: PageId, is_write: bool) {
        self.stats.page_faults += 1;

        let frame_index = match self.pool.take_free() {
            Some(idx) => idx,
            None => self.evict_one(),
        };

        // Carga: uma leitura de disco por falta, sempre. Uma escrita
        // que falta já chega sujando a página.
        self.stats.disk_reads += 1;
        self.pool.set_occupant(frame_index, page);
        self.table.set(page, frame_index, is_write);
        self.replacer.page_event(PageEvent::Loaded(page));

        if self.debug {
            debug!(
                "mmu: página {:#06X} carregada no frame {:#04X} (dirty={})",
                page, frame_index, is_write,
            );
        }
    }

    /// Pede uma vítima à política e devolve o frame liberado.
    fn evict_one(&mut self) -> usize {
        let victim = self.replacer.pick_victim(&self.pool, &mut self.table);

        let victim_page = match victim.page {
            Some(page) => page,
            None => {
                // Slot vago no meio de um pool "cheio": usamos o slot
                // sem despejar ninguém.
                return victim.frame_index;
            }
        };

        let entry = self
            .table
            .get_mut(victim_page)
            .expect("mmu: vítima sem entrada na tabela de páginas");

        if entry.dirty {
            self.stats.disk_writes += 1;
            if self.debug {
                debug!(
                    "mmu: página {:#06X} suja, salvando antes de sobrescrever",
                    victim_page,
                );
            }
        }

        // A entrada fica na tabela, só deixa de valer. O dirty antigo
        // sobrevive para inspeção até a próxima recarga.
        entry.valid = false;
        entry.frame = None;
        entry.referenced = false;

        self.pool.clear(victim.frame_index);

        if self.debug {
            debug!(
                "mmu: página {:#06X} despejada do frame {:#04X}",
                victim_page, victim.frame_index,
            );
        }

        victim.frame_index
    }
}
