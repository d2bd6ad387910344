use crate::frame_pool::FramePool;
use crate::page_replacer::{PageReplacer, Victim};
use crate::page_table::PageTable;

/// Substituição por segunda chance (relógio).
///
/// O ponteiro persiste entre despejos: cada varredura continua de onde
/// a anterior parou. Não há preferência por página limpa; só o bit de
/// uso decide.
pub struct ClockReplacer {
    hand: usize,
}

impl ClockReplacer {
    pub fn new() -> Self {
        ClockReplacer { hand: 0 }
    }
}

impl PageReplacer for ClockReplacer {
    fn pick_victim(&mut self, pool: &FramePool, table: &mut PageTable) -> Victim {
        let n = pool.len();

        // Cada passo escolhe uma vítima ou limpa um bit de uso, então
        // a varredura acaba em no máximo 2n passos. Passar disso é bug
        // de contabilidade, e aí é melhor morrer do que inventar uma
        // vítima.
        for _ in 0..(2 * n) {
            let idx = self.hand;
            self.hand = (idx + 1) % n;

            let page = match pool.occupant(idx) {
                Some(page) => page,
                // Slot vago com o pool supostamente cheio: usa o slot,
                // ninguém precisa sair.
                None => {
                    return Victim {
                        frame_index: idx,
                        page: None,
                    }
                }
            };

            let entry = table
                .get_mut(page)
                .expect("clock: página residente sem entrada na tabela");

            if !entry.referenced {
                return Victim {
                    frame_index: idx,
                    page: Some(page),
                };
            }

            // Segunda chance: limpa o bit e segue.
            entry.referenced = false;
        }

        panic!("clock: varredura não convergiu em 2 * num_frames passos");
    }
}
