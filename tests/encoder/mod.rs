#![allow(dead_code)]

/// A code to encode, mirroring the layouts the decoder reads.
#[derive(Clone, Copy, Debug)]
pub enum Unit {
    /// `01` prefix, reserved bit clear, eight-bit value.
    Full(u8),
    /// `00` prefix; the value must be below 512.
    Raw(u16),
    /// `10` for `0..=15`, `11` for `-16..=-1`.
    Delta(i8),
}

#[derive(Default)]
pub struct BitWriter {
    bits: Vec<bool>,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: u32, width: usize) -> &mut Self {
        for i in (0..width).rev() {
            self.bits.push((value >> i) & 1 == 1);
        }
        self
    }

    pub fn zeros(&mut self, n: usize) -> &mut Self {
        self.bits.extend(std::iter::repeat_n(false, n));
        self
    }

    pub fn ones(&mut self, n: usize) -> &mut Self {
        self.bits.extend(std::iter::repeat_n(true, n));
        self
    }

    pub fn unit(&mut self, unit: Unit) -> &mut Self {
        match unit {
            Unit::Full(v) => self.push(0b010, 3).push(v.into(), 8),
            Unit::Raw(v) => {
                assert!(v < 512);
                self.push(v.into(), 11)
            }
            Unit::Delta(d) if d >= 0 => {
                assert!(d <= 15);
                self.push(0b10, 2).push(d as u32, 4)
            }
            Unit::Delta(d) => {
                assert!(d >= -16);
                let raw = ((-d - 1) as u32) ^ 0xF;
                self.push(0b11, 2).push(raw, 4)
            }
        }
    }

    pub fn units(&mut self, units: &[Unit]) -> &mut Self {
        for &u in units {
            self.unit(u);
        }
        self
    }

    /// A lap block holding `ones` set bits at its start, zero elsewhere.
    pub fn lap_block(&mut self, ones: usize) -> &mut Self {
        self.ones(ones).zeros(416 - ones)
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Pack into bytes, padding the final byte with zeros.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bits
            .chunks(8)
            .map(|c| {
                c.iter()
                    .enumerate()
                    .fold(0u8, |acc, (i, &b)| acc | ((b as u8) << (7 - i)))
            })
            .collect()
    }
}

/// The values a sequence of units decodes to, starting from no prior value.
pub fn expected_values(units: &[Unit]) -> Vec<u16> {
    let mut last = 0u16;
    units
        .iter()
        .map(|u| {
            last = match *u {
                Unit::Full(v) => v.into(),
                Unit::Raw(v) => v,
                Unit::Delta(d) => (i32::from(last) + i32::from(d)).max(0) as u16,
            };
            last
        })
        .collect()
}
