//! Text renderings for the primary diagnostic channel.
//!
//! - [`DiagRecord`] — `$<lux> <smoothed> <notch> <fir>;`, three decimals,
//!   no trailing newline.  Plotting tools split on `$` and `;`.
//! - [`BinaryEcho`] — each transmitted byte as two nibble groups, e.g.
//!   `0001 0001 0000 0001 0100 0101`.  Debug aid only, not wire format.

use core::fmt;

use crate::filters::FilterOutputs;

pub struct DiagRecord<'a>(pub &'a FilterOutputs);

impl fmt::Display for DiagRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = self.0;
        write!(f, "${:.3} {:.3} {:.3} {:.3};", o.lux, o.smoothed, o.notch, o.fir)
    }
}

pub struct BinaryEcho<'a>(pub &'a [u8]);

impl fmt::Display for BinaryEcho<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:04b} {:04b}", byte >> 4, byte & 0x0F)?;
        }
        Ok(())
    }
}
