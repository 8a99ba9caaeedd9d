//! Debug formatting utilities.

use crate::codec;
use std::fmt::{self, Debug, Formatter};

/// Formats bytes as a DATA string.
pub struct Hex<'a>(pub &'a [u8]);

impl Debug for Hex<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&codec::encode_data(self.0))
    }
}
