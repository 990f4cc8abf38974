//! Mathematical constants with sources

use reckon_plugin::ConstantDef;

pub fn pi() -> ConstantDef {
    ConstantDef {
        name: "pi".to_string(),
        value: std::f64::consts::PI,
        source: "https://oeis.org/A000796".to_string(),
        category: "transcendental".to_string(),
    }
}

pub fn e() -> ConstantDef {
    ConstantDef {
        name: "e".to_string(),
        value: std::f64::consts::E,
        source: "https://oeis.org/A001113".to_string(),
        category: "transcendental".to_string(),
    }
}

pub fn phi() -> ConstantDef {
    ConstantDef {
        name: "phi".to_string(),
        value: (1.0 + 5.0_f64.sqrt()) / 2.0,
        source: "https://oeis.org/A001622".to_string(),
        category: "algebraic".to_string(),
    }
}
