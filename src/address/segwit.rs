//! Bech32-family addresses: native segwit and MWEB
//!
//! Both encodings share the bech32 checksum and the 5-bit data alphabet.
//! Segwit addresses carry a witness version followed by the witness
//! program; MWEB addresses carry a 66-byte program (scan and spend keys)
//! and are allowed to exceed the usual 90 character limit.

use super::types::{AddressInfo, AddressType, InvalidReason, Network};
use crate::constants::{
    HRP_MAINNET, HRP_REGTEST, HRP_TESTNET, MAX_WITNESS_VERSION, MWEB_HRP_MAINNET,
    MWEB_HRP_REGTEST, MWEB_HRP_TESTNET, MWEB_MAX_LEN, MWEB_PROGRAM_LEN, SEGWIT_MAX_LEN,
};
use bech32::primitives::decode::{CheckedHrpstring, CheckedHrpstringError};
use bech32::{Bech32, Bech32m, Fe32};

/// HRP and 5-bit words of a checksum-verified string
struct Decoded {
    hrp: String,
    words: Vec<u8>,
}

fn checksum_reason(err: CheckedHrpstringError) -> InvalidReason {
    match err {
        CheckedHrpstringError::Checksum(_) => InvalidReason::BadChecksum,
        _ => InvalidReason::BadEncoding,
    }
}

/// Verify the checksum and split out HRP and data words
///
/// `allow_bech32m` also accepts the BIP350 checksum when the BIP173 one
/// does not verify.
fn decode(address: &str, max_len: usize, allow_bech32m: bool) -> Result<Decoded, InvalidReason> {
    if address.len() > max_len {
        return Err(InvalidReason::BadLength);
    }

    let checked = match CheckedHrpstring::new::<Bech32>(address) {
        Ok(checked) => checked,
        Err(_) if allow_bech32m => {
            CheckedHrpstring::new::<Bech32m>(address).map_err(checksum_reason)?
        }
        Err(e) => return Err(checksum_reason(e)),
    };

    let words = checked
        .data_part_ascii_no_checksum()
        .iter()
        .map(|c| Fe32::from_char(c.to_ascii_lowercase() as char).map(Fe32::to_u8))
        .collect::<Result<Vec<u8>, _>>()
        .map_err(|_| InvalidReason::BadEncoding)?;

    Ok(Decoded {
        hrp: checked.hrp().to_lowercase(),
        words,
    })
}

/// Regroup 5-bit words into bytes
///
/// Leftover bits must be fewer than five and all zero.
pub fn words_to_bytes(words: &[u8]) -> Result<Vec<u8>, InvalidReason> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut out = Vec::with_capacity(words.len() * 5 / 8);

    for &word in words {
        if word >> 5 != 0 {
            return Err(InvalidReason::BadEncoding);
        }
        acc = (acc << 5) | u32::from(word);
        bits += 5;
        while bits >= 8 {
            bits -= 8;
            out.push(((acc >> bits) & 0xff) as u8);
        }
    }

    if bits >= 5 || (acc << (8 - bits)) & 0xff != 0 {
        return Err(InvalidReason::BadPadding);
    }

    Ok(out)
}

fn segwit_network(hrp: &str) -> Option<Network> {
    match hrp {
        HRP_MAINNET => Some(Network::Mainnet),
        HRP_TESTNET => Some(Network::Testnet),
        HRP_REGTEST => Some(Network::Regtest),
        _ => None,
    }
}

fn mweb_network(hrp: &str) -> Option<Network> {
    match hrp {
        MWEB_HRP_MAINNET => Some(Network::Mainnet),
        MWEB_HRP_TESTNET => Some(Network::Testnet),
        MWEB_HRP_REGTEST => Some(Network::Regtest),
        _ => None,
    }
}

/// Decode and classify a native segwit address
pub fn parse_segwit(address: &str) -> Result<AddressInfo, InvalidReason> {
    // bech32 or bech32m, at any witness version
    let decoded = decode(address, SEGWIT_MAX_LEN, true)?;

    let network = segwit_network(&decoded.hrp).ok_or(InvalidReason::UnknownPrefix)?;

    let (&witness_version, program_words) =
        decoded.words.split_first().ok_or(InvalidReason::BadLength)?;
    if witness_version > MAX_WITNESS_VERSION {
        return Err(InvalidReason::BadWitnessVersion(witness_version));
    }

    let program = words_to_bytes(program_words)?;

    let address_type = if program.len() == 20 {
        AddressType::P2wpkh
    } else if witness_version == 1 {
        AddressType::P2tr
    } else {
        AddressType::P2wsh
    };

    Ok(AddressInfo::new(address, network, address_type))
}

/// Decode and classify an MWEB address
pub fn parse_mweb(address: &str) -> Result<AddressInfo, InvalidReason> {
    let decoded = decode(address, MWEB_MAX_LEN, false)?;

    let network = mweb_network(&decoded.hrp).ok_or(InvalidReason::UnknownPrefix)?;

    // First word is the MWEB address version
    let (_, program_words) = decoded.words.split_first().ok_or(InvalidReason::BadLength)?;
    let program = words_to_bytes(program_words)?;
    if program.len() != MWEB_PROGRAM_LEN {
        return Err(InvalidReason::BadLength);
    }

    Ok(AddressInfo::new(address, network, AddressType::Mweb))
}
