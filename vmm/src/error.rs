use std::{error, fmt, result};

/// Erros da biblioteca.
///
/// Violações de invariante (despejo sem nenhuma página residente, por
/// exemplo) não aparecem aqui: elas indicam bug de contabilidade e
/// derrubam o processo com `panic!`, porque continuar produziria
/// estatísticas sem sentido.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Error {
    /// Número de frames rejeitado na construção da MMU.
    InvalidFrameCount(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidFrameCount(n) => {
                write!(f, "número de frames inválido: {}", n)
            }
        }
    }
}

impl error::Error for Error {}

/// Alias de `Result` com o [`Error`] da biblioteca.
pub type Result<T> = result::Result<T, Error>;
