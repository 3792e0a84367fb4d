mod decoder;
mod luma;
mod pipeline;

pub use decoder::{RqrrDecoder, SymbolDecoder};
pub use luma::LumaPlane;
pub use pipeline::{decode_plan, decode_plane, decode_qr, DecodeAttempt, DecodeOutcome, Polarity};
