//! Substituição por recência estrita (LRU).
//!
//! A parte interessante está na estrutura de recência. A ideia ingênua
//! -- varrer um vetor a cada acesso para achar a página e movê-la para
//! o fim -- custa O(n) no caminho mais quente do simulador. Em vez
//! disso, os nós moram num arena (`Vec`) e formam uma lista duplamente
//! encadeada por índices, com um mapa página -> nó ao lado:
//!
//! - head  = menos recentemente usada (a próxima vítima);
//! - tail  = mais recentemente usada;
//! - mover para o fim e despejar a cabeça são ambos O(1).
//!
//! Slots de nós despejados voltam para uma lista de livres e são
//! reaproveitados, então o arena nunca cresce além do número de
//! páginas simultaneamente residentes.

use std::collections::HashMap;

use crate::frame_pool::FramePool;
use crate::page_replacer::{PageEvent, PageReplacer, Victim};
use crate::page_table::{PageId, PageTable};

struct Node {
    page: PageId,
    prev: Option<usize>,
    next: Option<usize>,
}

/// A lista de recência das páginas residentes.
struct RecencyList {
    nodes: Vec<Node>,
    map: HashMap<PageId, usize>,
    head: Option<usize>,
    tail: Option<usize>,
    free: Vec<usize>,
}

impl RecencyList {
    fn new() -> Self {
        RecencyList {
            nodes: Vec::new(),
            map: HashMap::new(),
            head: None,
            tail: None,
            free: Vec::new(),
        }
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    /// Move a página para o fim (mais recente), inserindo se preciso.
    fn touch(&mut self, page: PageId) {
        if let Some(&idx) = self.map.get(&page) {
            self.unlink(idx);
            self.attach_back(idx);
        } else {
            let idx = self.alloc(page);
            self.map.insert(page, idx);
            self.attach_back(idx);
        }
    }

    /// Remove e devolve a página menos recentemente usada.
    fn pop_front(&mut self) -> Option<PageId> {
        let idx = self.head?;
        let page = self.nodes[idx].page;

        self.unlink(idx);
        self.map.remove(&page);
        self.free.push(idx);

        Some(page)
    }

    fn alloc(&mut self, page: PageId) -> usize {
        let node = Node {
            page,
            prev: None,
            next: None,
        };

        match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = node;
                idx
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    /// Desliga o nó dos vizinhos, consertando head/tail no caminho.
    fn unlink(&mut self, idx: usize) {
        let (prev, next) = (self.nodes[idx].prev, self.nodes[idx].next);

        match prev {
            Some(p) => self.nodes[p].next = next,
            None => self.head = next,
        }

        match next {
            Some(n) => self.nodes[n].prev = prev,
            None => self.tail = prev,
        }

        self.nodes[idx].prev = None;
        self.nodes[idx].next = None;
    }

    /// Pendura o nó no fim da lista.
    fn attach_back(&mut self, idx: usize) {
        self.nodes[idx].prev = self.tail;
        self.nodes[idx].next = None;

        match self.tail {
            Some(t) => self.nodes[t].next = Some(idx),
            None => self.head = Some(idx),
        }

        self.tail = Some(idx);
    }
}

/// Substituição por recência estrita.
pub struct LruReplacer {
    order: RecencyList,
}

impl LruReplacer {
    pub fn new() -> Self {
        LruReplacer {
            order: RecencyList::new(),
        }
    }
}

impl PageReplacer for LruReplacer {
    fn page_event(&mut self, event: PageEvent) {
        match event {
            PageEvent::Touched(page) | PageEvent::Loaded(page) => self.order.touch(page),
        }
    }

    fn pick_victim(&mut self, _pool: &FramePool, table: &mut PageTable) -> Victim {
        let page = self
            .order
            .pop_front()
            .expect("lru: despejo pedido sem nenhuma página residente");

        let frame_index = table
            .get(page)
            .and_then(|entry| entry.frame)
            .expect("lru: página residente sem frame na tabela");

        Victim {
            frame_index,
            page: Some(page),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mmu::Mmu;
    use rand::{Rng, SeedableRng};
    use rand_xorshift::XorShiftRng;

    #[test]
    fn recency_list_pops_in_access_order() {
        let mut list = RecencyList::new();

        list.touch(0xA);
        list.touch(0xB);
        list.touch(0xC);
        list.touch(0xA); // A vira a mais recente

        assert_eq!(list.len(), 3);
        assert_eq!(list.pop_front(), Some(0xB));
        assert_eq!(list.pop_front(), Some(0xC));
        assert_eq!(list.pop_front(), Some(0xA));
        assert_eq!(list.pop_front(), None);
    }

    #[test]
    fn recency_list_reuses_freed_slots() {
        let mut list = RecencyList::new();

        list.touch(0xA);
        list.touch(0xB);
        list.pop_front();
        list.touch(0xC);

        // O nó de A foi reaproveitado para C; o arena não cresceu.
        assert_eq!(list.nodes.len(), 2);
        assert_eq!(list.pop_front(), Some(0xB));
        assert_eq!(list.pop_front(), Some(0xC));
    }

    #[test]
    fn evicts_least_recently_used_page() {
        let mut mmu = Mmu::new(2, LruReplacer::new()).unwrap();

        // A, B, A, C: na falta de C quem sai é B, não A.
        mmu.read(0xA);
        mmu.read(0xB);
        mmu.read(0xA);
        mmu.read(0xC);

        assert!(mmu.page_table().get(0xA).unwrap().valid);
        assert!(!mmu.page_table().get(0xB).unwrap().valid);
        assert!(mmu.page_table().get(0xC).unwrap().valid);
    }

    #[test]
    fn write_hits_also_refresh_recency() {
        let mut mmu = Mmu::new(2, LruReplacer::new()).unwrap();

        mmu.read(0xA);
        mmu.read(0xB);
        mmu.write(0xA);
        mmu.read(0xC);

        assert!(mmu.page_table().get(0xA).unwrap().valid);
        assert!(!mmu.page_table().get(0xB).unwrap().valid);
    }

    #[test]
    #[should_panic(expected = "lru: despejo pedido")]
    fn eviction_with_nothing_resident_is_fatal() {
        let pool = FramePool::new(1);
        let mut table = PageTable::new();

        LruReplacer::new().pick_victim(&pool, &mut table);
    }

    /// Propriedade de pilha do LRU: mais frames nunca significam mais
    /// faltas no mesmo trace. Não vale para clock nem random, então o
    /// teste só cobre o LRU.
    #[test]
    fn more_frames_never_fault_more() {
        let mut rng = XorShiftRng::seed_from_u64(0x5EED);
        let trace: Vec<(usize, bool)> = (0..2000)
            .map(|_| (rng.gen_range(0, 32), rng.gen_range(0, 4) == 0))
            .collect();

        let mut last_faults = u64::MAX;
        for frames in [2, 4, 8, 16, 32] {
            let mut mmu = Mmu::new(frames, LruReplacer::new()).unwrap();
            for &(page, is_write) in &trace {
                if is_write {
                    mmu.write(page);
                } else {
                    mmu.read(page);
                }
            }

            let faults = mmu.stats().page_faults;
            assert!(faults <= last_faults);
            last_faults = faults;
        }
    }
}
