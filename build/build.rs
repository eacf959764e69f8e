pub(crate) mod features;
pub(crate) mod regions;

use std::{env, fs, path::PathBuf};

fn main() {
    assert!(
        features::validate_selected_sources(),
        "
This crate requires exactly one SRAM bit-band configuration source:
    feature cortex-m3 or cortex-m4 (architectural map, enabled by default)
    environment variables {} and {} (optional {}),
        together with `default-features = false`
",
        regions::SRAM_BASE_VAR,
        regions::SRAM_BB_BASE_VAR,
        regions::SRAM_BB_SIZE_VAR,
    );

    let layout = match features::selected_layout() {
        Some(layout) => layout,
        None => regions::Layout::from_env(),
    };
    layout.check_pointer_width();

    let out = PathBuf::from(env::var_os("OUT_DIR").expect("cargo always sets OUT_DIR"));
    fs::write(out.join("regions.rs"), layout.render()).expect("unable to write regions.rs");

    for var in regions::ENV_VARS {
        println!("cargo:rerun-if-env-changed={}", var);
    }
    println!("cargo:rerun-if-changed=build");
}

pub(crate) struct FeatureGate<'a> {
    pub name: &'a str,
    pub state: bool,
}
