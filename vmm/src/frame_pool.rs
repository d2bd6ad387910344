use std::collections::VecDeque;

use crate::page_table::PageId;

/// O conjunto fixo de frames físicos de uma MMU.
///
/// Cada frame guarda no máximo uma página residente. Os índices nunca
/// usados ficam numa fila de livres; um frame despejado não volta para
/// a fila, porque o tratador de falta o reutiliza na mesma hora.
pub struct FramePool {
    frames: Vec<Option<PageId>>,
    free: VecDeque<usize>,
}

impl FramePool {
    pub fn new(num_frames: usize) -> Self {
        FramePool {
            frames: vec![None; num_frames],
            free: (0..num_frames).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Pega um frame da fila de livres, se ainda houver algum.
    pub fn take_free(&mut self) -> Option<usize> {
        self.free.pop_front()
    }

    pub fn occupant(&self, frame_index: usize) -> Option<PageId> {
        self.frames[frame_index]
    }

    pub fn set_occupant(&mut self, frame_index: usize, page: PageId) {
        self.frames[frame_index] = Some(page);
    }

    /// Esvazia o slot, sem devolvê-lo à fila de livres.
    pub fn clear(&mut self, frame_index: usize) {
        self.frames[frame_index] = None;
    }

    pub fn occupied_count(&self) -> usize {
        self.frames.iter().filter(|slot| slot.is_some()).count()
    }

    /// Índices dos frames ocupados, em ordem crescente.
    pub fn occupied_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.frames
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.map(|_| idx))
    }
}
