use rand::seq::SliceRandom;
use rand::{thread_rng, Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

use crate::frame_pool::FramePool;
use crate::page_replacer::{PageReplacer, Victim};
use crate::page_table::PageTable;

/// Substituição aleatória: vítima uniforme entre os frames ocupados.
///
/// Nenhum estado de recência; a única coisa que a política carrega é o
/// gerador. Como os frames ocupados estão em bijeção com as páginas
/// residentes, sortear um frame ocupado é o mesmo que sortear uma
/// página residente.
pub struct RandomReplacer {
    rng: XorShiftRng,
}

impl RandomReplacer {
    pub fn new() -> Self {
        RandomReplacer::with_seed(thread_rng().gen())
    }

    /// Gerador com seed fixa: a sequência de vítimas vira reprodutível,
    /// que é a diferença entre um teste e um cara-ou-coroa.
    pub fn with_seed(seed: u64) -> Self {
        RandomReplacer {
            rng: XorShiftRng::seed_from_u64(seed),
        }
    }
}

impl PageReplacer for RandomReplacer {
    fn pick_victim(&mut self, pool: &FramePool, _table: &mut PageTable) -> Victim {
        let occupied: Vec<usize> = pool.occupied_indices().collect();

        let &frame_index = occupied
            .choose(&mut self.rng)
            .expect("random: despejo pedido sem nenhuma página residente");

        let page = pool
            .occupant(frame_index)
            .expect("random: frame ocupado sem página");

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

    fn run_abc(seed: u64) -> (bool, bool) {
        let mut mmu = Mmu::new(2, RandomReplacer::with_seed(seed)).unwrap();

        mmu.read(0xA);
        mmu.read(0xB);
        mmu.read(0xC);

        let a_evicted = !mmu.page_table().get(0xA).unwrap().valid;
        let b_evicted = !mmu.page_table().get(0xB).unwrap().valid;
        (a_evicted, b_evicted)
    }

    #[test]
    fn same_seed_same_victims() {
        assert_eq!(run_abc(0xCAFE), run_abc(0xCAFE));
    }

    #[test]
    fn both_victims_show_up_across_seeds() {
        let mut a_count = 0;
        let mut b_count = 0;

        for seed in 0..64 {
            let (a_evicted, b_evicted) = run_abc(seed);
            // Exatamente uma das duas saiu.
            assert_ne!(a_evicted, b_evicted);
            if a_evicted {
                a_count += 1;
            } else {
                b_count += 1;
            }
        }

        assert!(a_count > 0);
        assert!(b_count > 0);
    }

    #[test]
    fn single_frame_victim_is_forced() {
        // Com um frame só existe uma vítima possível; o sorteio vira
        // determinístico por falta de opção.
        for seed in 0..8 {
            let mut mmu = Mmu::new(1, RandomReplacer::with_seed(seed)).unwrap();
            mmu.read(0xA);
            mmu.read(0xB);

            assert!(!mmu.page_table().get(0xA).unwrap().valid);
            assert!(mmu.page_table().get(0xB).unwrap().valid);
        }
    }

    #[test]
    fn counters_match_the_other_policies_rules() {
        let mut mmu = Mmu::new(2, RandomReplacer::with_seed(7)).unwrap();

        for page in [0xA, 0xB, 0xC, 0xD, 0xA, 0xB] {
            mmu.write(page);
        }

        let stats = mmu.stats();
        assert_eq!(stats.disk_reads, stats.page_faults);
        assert!(stats.disk_writes <= stats.page_faults);
        assert_eq!(mmu.resident_count(), 2);
    }

    #[test]
    fn eviction_ignores_recency_state() {
        // A política nem implementa page_event; despejar logo após
        // encher o pool funciona sem nenhum evento entregue.
        let mut pool = FramePool::new(2);
        let mut table = PageTable::new();

        pool.take_free();
        pool.take_free();
        pool.set_occupant(0, 0xA);
        pool.set_occupant(1, 0xB);
        table.set(0xA, 0, false);
        table.set(0xB, 1, false);

        let victim = RandomReplacer::with_seed(1).pick_victim(&pool, &mut table);
        assert!(victim.page == Some(0xA) || victim.page == Some(0xB));
    }
}
