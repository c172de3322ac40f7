/// Low nibble of the first header byte.
///
/// Reserved opcodes keep their raw value so a header can be written back
/// exactly as it was read; deciding whether they are acceptable is left to
/// the caller.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Opcode {
    Continuation,       // 0x0
    Text,               // 0x1
    Binary,             // 0x2
    RsvNonControl(u8),  // 0x3..=0x7
    Close,              // 0x8
    Ping,               // 0x9
    Pong,               // 0xA
    RsvControl(u8),     // 0xB..=0xF
}

impl Default for Opcode {
    fn default() -> Self { Opcode::Continuation }
}

impl Opcode {
    /// Only the low 4 bits of `nibble` are looked at.
    pub fn from_nibble(nibble: u8) -> Self {
        match nibble & 0x0F {
            0x0 => Opcode::Continuation,
            0x1 => Opcode::Text,
            0x2 => Opcode::Binary,
            0x8 => Opcode::Close,
            0x9 => Opcode::Ping,
            0xA => Opcode::Pong,
            rsv @ 0x3..=0x7 => Opcode::RsvNonControl(rsv),
            rsv => Opcode::RsvControl(rsv),
        }
    }

    pub fn as_nibble(&self) -> u8 {
        match *self {
            Opcode::Continuation => 0x0,
            Opcode::Text => 0x1,
            Opcode::Binary => 0x2,
            Opcode::Close => 0x8,
            Opcode::Ping => 0x9,
            Opcode::Pong => 0xA,
            Opcode::RsvNonControl(rsv) | Opcode::RsvControl(rsv) => rsv & 0x0F,
        }
    }

    pub fn is_continuation(&self) -> bool { *self == Opcode::Continuation }
    pub fn is_text(&self) -> bool { *self == Opcode::Text }
    pub fn is_binary(&self) -> bool { *self == Opcode::Binary }
    pub fn is_rsv_non_control(&self) -> bool { matches!(*self, Opcode::RsvNonControl(_)) }
    pub fn is_close(&self) -> bool { *self == Opcode::Close }
    pub fn is_ping(&self) -> bool { *self == Opcode::Ping }
    pub fn is_pong(&self) -> bool { *self == Opcode::Pong }
    pub fn is_rsv_control(&self) -> bool { matches!(*self, Opcode::RsvControl(_)) }

    pub fn is_control(&self) -> bool {
        self.as_nibble() & 0x8 != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_nibble_maps_back_to_itself() {
        for nibble in 0..=0x0Fu8 {
            assert_eq!(Opcode::from_nibble(nibble).as_nibble(), nibble);
        }
    }

    #[test]
    fn control_opcodes_have_the_high_bit_set() {
        assert!(Opcode::Close.is_control());
        assert!(Opcode::Ping.is_control());
        assert!(Opcode::from_nibble(0xB).is_rsv_control());
        assert!(!Opcode::Text.is_control());
        assert!(Opcode::from_nibble(0x3).is_rsv_non_control());
        assert!(!Opcode::from_nibble(0x7).is_control());
    }
}
