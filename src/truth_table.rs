//! Fixed truth tables used as verification oracles
//!
//! Both tables are compile-time constants. The full-adder table maps
//! `(A, B, Cin)` to the expected `(Cout, Sum)` pair, and the gate tables pair a
//! fixed enumeration of `(A, B)` rows with the six output patterns that name a
//! simple 2-input gate.

use std::fmt;

/// One row of a truth table: `I` input bits mapped to `O` expected output bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TruthRow<const I: usize, const O: usize> {
    /// Input bits, in signal order
    pub inputs: [bool; I],
    /// Expected output bits, in signal order
    pub outputs: [bool; O],
}

impl<const I: usize, const O: usize> TruthRow<I, O> {
    const fn new(inputs: [bool; I], outputs: [bool; O]) -> Self {
        Self { inputs, outputs }
    }
}

/// A full-adder row: `(A, B, Cin) -> (Cout, Sum)`
pub type AdderRow = TruthRow<3, 2>;

const L: bool = false;
const H: bool = true;

/// The 1-bit full-adder truth table, in enumeration order
///
/// Rows run from `(0, 0, 0)` to `(1, 1, 1)`; outputs are `(Cout, Sum)`.
pub const FULL_ADDER: [AdderRow; 8] = [
    TruthRow::new([L, L, L], [L, L]),
    TruthRow::new([L, L, H], [L, H]),
    TruthRow::new([L, H, L], [L, H]),
    TruthRow::new([L, H, H], [H, L]),
    TruthRow::new([H, L, L], [L, H]),
    TruthRow::new([H, L, H], [H, L]),
    TruthRow::new([H, H, L], [H, L]),
    TruthRow::new([H, H, H], [H, H]),
];

/// Input rows driven onto a 2-input gate, in enumeration order
pub const GATE_INPUTS: [[bool; 2]; 4] = [[L, L], [L, H], [H, L], [H, H]];

/// Compute `(Cout, Sum)` for a 1-bit full adder
///
/// `Cout` is the majority of the three inputs and `Sum` is their parity.
pub fn full_adder(a: bool, b: bool, carry_in: bool) -> (bool, bool) {
    let carry_out = (a && b) || (a && carry_in) || (b && carry_in);
    let sum = a ^ b ^ carry_in;
    (carry_out, sum)
}

/// The six simple 2-input gates that can be identified from a truth table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateKind {
    And,
    Nand,
    Or,
    Nor,
    Xor,
    Xnor,
}

impl GateKind {
    /// Every known gate, in pattern-table order
    pub const ALL: [GateKind; 6] = [
        GateKind::And,
        GateKind::Nand,
        GateKind::Or,
        GateKind::Nor,
        GateKind::Xor,
        GateKind::Xnor,
    ];

    /// Evaluate the gate for one pair of inputs
    pub fn eval(self, a: bool, b: bool) -> bool {
        match self {
            GateKind::And => a && b,
            GateKind::Nand => !(a && b),
            GateKind::Or => a || b,
            GateKind::Nor => !(a || b),
            GateKind::Xor => a ^ b,
            GateKind::Xnor => !(a ^ b),
        }
    }

    /// The output pattern this gate produces over [`GATE_INPUTS`]
    pub fn pattern(self) -> [bool; 4] {
        GATE_INPUTS.map(|[a, b]| self.eval(a, b))
    }

    /// Look up the gate whose signature matches an observed pattern
    ///
    /// Returns `None` for the ten 4-bit patterns that are not a simple gate,
    /// such as a constant output or one that follows a single input.
    ///
    /// # Examples
    ///
    /// ```
    /// use logic_tester::GateKind;
    ///
    /// assert_eq!(GateKind::from_pattern([false, true, true, false]), Some(GateKind::Xor));
    /// assert_eq!(GateKind::from_pattern([false; 4]), None);
    /// ```
    pub fn from_pattern(pattern: [bool; 4]) -> Option<GateKind> {
        GateKind::ALL
            .into_iter()
            .find(|gate| gate.pattern() == pattern)
    }

    /// Upper-case gate name, e.g. `"NAND"`
    pub fn name(self) -> &'static str {
        match self {
            GateKind::And => "AND",
            GateKind::Nand => "NAND",
            GateKind::Or => "OR",
            GateKind::Nor => "NOR",
            GateKind::Xor => "XOR",
            GateKind::Xnor => "XNOR",
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Render bits as a `0`/`1` tuple, e.g. `(0, 1, 1)`
pub fn format_bits(bits: &[bool]) -> String {
    let digits: Vec<&str> = bits.iter().map(|&b| if b { "1" } else { "0" }).collect();
    format!("({})", digits.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_adder_table_matches_function() {
        for row in FULL_ADDER {
            let [a, b, cin] = row.inputs;
            let (cout, sum) = full_adder(a, b, cin);
            assert_eq!(row.outputs, [cout, sum], "row {:?}", row.inputs);
        }
    }

    #[test]
    fn test_full_adder_table_order() {
        for (i, row) in FULL_ADDER.iter().enumerate() {
            let expected = [i & 0b100 != 0, i & 0b010 != 0, i & 0b001 != 0];
            assert_eq!(row.inputs, expected);
        }
    }

    #[test]
    fn test_gate_input_order() {
        assert_eq!(
            GATE_INPUTS,
            [[false, false], [false, true], [true, false], [true, true]]
        );
    }

    #[test]
    fn test_gate_patterns() {
        let p = |bits: [u8; 4]| bits.map(|b| b == 1);
        assert_eq!(GateKind::And.pattern(), p([0, 0, 0, 1]));
        assert_eq!(GateKind::Nand.pattern(), p([1, 1, 1, 0]));
        assert_eq!(GateKind::Or.pattern(), p([0, 1, 1, 1]));
        assert_eq!(GateKind::Nor.pattern(), p([1, 0, 0, 0]));
        assert_eq!(GateKind::Xor.pattern(), p([0, 1, 1, 0]));
        assert_eq!(GateKind::Xnor.pattern(), p([1, 0, 0, 1]));
    }

    #[test]
    fn test_from_pattern_roundtrips_every_gate() {
        for gate in GateKind::ALL {
            assert_eq!(GateKind::from_pattern(gate.pattern()), Some(gate));
        }
    }

    #[test]
    fn test_only_six_patterns_are_known() {
        let known = (0u8..16)
            .map(|n| [n & 8 != 0, n & 4 != 0, n & 2 != 0, n & 1 != 0])
            .filter(|pattern| GateKind::from_pattern(*pattern).is_some())
            .count();
        assert_eq!(known, 6);
    }

    #[test]
    fn test_format_bits() {
        assert_eq!(format_bits(&[false, true, true]), "(0, 1, 1)");
        assert_eq!(format_bits(&[]), "()");
        assert_eq!(GateKind::Xnor.to_string(), "XNOR");
    }
}
