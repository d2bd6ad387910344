//! Leitura de arquivos de trace.
//!
//! Cada linha é um endereço em hexadecimal seguido da operação:
//!
//! ```text
//! 0041f7a0 R
//! 13f5e2c0 W
//! ```
//!
//! O número da página sai do endereço por um deslocamento fixo
//! (páginas de 4 KiB). Linha malformada derruba a simulação: seguir em
//! frente só produziria estatística sem sentido.

use std::convert::TryInto;
use std::io::BufRead;
use std::{error, fmt, io};

/// Deslocamento endereço -> página (páginas de 4 KiB).
pub const PAGE_OFFSET: u32 = 12;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Op {
    Read,
    Write,
}

/// Um evento do trace: endereço virtual e operação.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TraceEvent {
    pub addr: u64,
    pub op: Op,
}

impl TraceEvent {
    pub fn page(&self) -> usize {
        (self.addr >> PAGE_OFFSET) as usize
    }
}

#[derive(Debug)]
pub enum TraceError {
    /// Linha que não parseia, com o número dela (a partir de 1).
    Malformed { line: usize },
    Io(io::Error),
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TraceError::Malformed { line } => {
                write!(f, "linha {} do trace malformada", line)
            }
            TraceError::Io(err) => write!(f, "erro lendo o trace: {}", err),
        }
    }
}

impl error::Error for TraceError {}

impl From<io::Error> for TraceError {
    fn from(err: io::Error) -> Self {
        TraceError::Io(err)
    }
}

/// Lê o trace inteiro. Linhas em branco são ignoradas.
pub fn parse_trace(reader: impl BufRead) -> Result<Vec<TraceEvent>, TraceError> {
    let mut events = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let event = parse_line(&line).ok_or(TraceError::Malformed { line: idx + 1 })?;
        events.push(event);
    }

    Ok(events)
}

fn parse_line(line: &str) -> Option<TraceEvent> {
    let mut fields = line.split_whitespace();
    let addr_token = fields.next()?;
    let op_token = fields.next()?;
    if fields.next().is_some() {
        return None;
    }

    let op = match op_token {
        "R" => Op::Read,
        "W" => Op::Write,
        _ => return None,
    };

    Some(TraceEvent {
        addr: parse_addr(addr_token)?,
        op,
    })
}

/// Decodifica o endereço hexadecimal, com ou sem prefixo `0x`.
fn parse_addr(token: &str) -> Option<u64> {
    let digits = token.trim_start_matches("0x");
    if digits.is_empty() || digits.len() > 16 {
        return None;
    }

    // hex::decode só aceita comprimento par; completa com zeros à
    // esquerda até os 8 bytes de um u64.
    let padded = format!("{:0>16}", digits);
    let bytes: [u8; 8] = hex::decode(padded).ok()?.try_into().ok()?;

    Some(u64::from_be_bytes(bytes))
}
