//! Protocol module containing the event record codec and the sub-event decoder.

pub mod decoder;
pub mod record;

pub use decoder::{decode, DecoderState, EventDecoder, TouchEvent};
pub use record::{decode_record, encode_record, DecodeError, EventRecord, RecordLayout};
