//! Safe signature parsing, validation, export and creation

mod exporter;
mod kind;
mod parser;
mod signer;
mod validator;

pub use exporter::export_signatures;
pub use kind::{SafeSignature, SignatureType};
pub use parser::{parse_signatures, TrailingData};
pub use signer::{eth_sign_hash, sign_hash};
pub use validator::{ChainReader, ProviderReader, SignatureValidator, ValidatorConfig};
