use crate::frame_pool::FramePool;
use crate::page_table::{PageId, PageTable};

/// Eventos que a MMU reporta à política de substituição.
pub enum PageEvent {
    /// A página sofreu um hit.
    Touched(PageId),
    /// A página acabou de ser carregada em um frame.
    Loaded(PageId),
}

/// O frame escolhido para receber a página nova.
///
/// `page == None` quer dizer que a política encontrou um slot vago.
/// Não deveria acontecer com o pool cheio, mas é tratado como "nenhum
/// despejo necessário", e não como erro.
pub struct Victim {
    pub frame_index: usize,
    pub page: Option<PageId>,
}

/// Uma política de substituição de páginas.
pub trait PageReplacer {
    fn page_event(&mut self, _event: PageEvent) {}

    /// Escolhe a vítima. Só é chamada quando não existe frame livre.
    fn pick_victim(&mut self, pool: &FramePool, table: &mut PageTable) -> Victim;
}
