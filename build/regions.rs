use std::env;

pub(crate) const SRAM_BASE_VAR: &str = "SRAM_BASE";
pub(crate) const SRAM_BB_BASE_VAR: &str = "SRAM_BB_BASE";
pub(crate) const SRAM_BB_SIZE_VAR: &str = "SRAM_BB_SIZE";

pub(crate) const ENV_VARS: &[&str] = &[SRAM_BASE_VAR, SRAM_BB_BASE_VAR, SRAM_BB_SIZE_VAR];

/// Bit-band region covers the lowest MiB of SRAM
const DEFAULT_SIZE: u64 = 0x0010_0000;

/// SRAM bit-band pair as laid out by the ARMv7-M memory map of `cpu`
pub(crate) fn armv7m_sram(cpu: &'static str) -> Layout {
    Layout {
        source_base: 0x2000_0000,
        alias_base: 0x2200_0000,
        size: DEFAULT_SIZE,
        origin: cpu,
    }
}

pub(crate) struct Layout {
    source_base: u64,
    alias_base: u64,
    size: u64,
    origin: &'static str,
}

/// any of the override variables set selects the environment as configuration source
pub(crate) fn is_env_override_present() -> bool {
    ENV_VARS.iter().any(|var| env::var_os(var).is_some())
}

impl Layout {
    pub(crate) fn from_env() -> Self {
        let source_base = required(SRAM_BASE_VAR);
        let alias_base = required(SRAM_BB_BASE_VAR);
        let size = match env::var(SRAM_BB_SIZE_VAR) {
            Ok(value) => parse(SRAM_BB_SIZE_VAR, &value),
            Err(_) => DEFAULT_SIZE,
        };

        Layout {
            source_base,
            alias_base,
            size,
            origin: "environment override",
        }
    }

    /// every address of both windows has to be representable on the target
    pub(crate) fn check_pointer_width(&self) {
        let width: u32 = env::var("CARGO_CFG_TARGET_POINTER_WIDTH")
            .ok()
            .and_then(|w| w.parse().ok())
            .unwrap_or(64);
        let limit = if width >= 64 { u64::MAX } else { (1u64 << width) - 1 };

        for (name, value) in [
            (SRAM_BASE_VAR, self.source_base),
            (SRAM_BB_BASE_VAR, self.alias_base),
            (SRAM_BB_SIZE_VAR, self.size),
        ]
        .iter()
        {
            assert!(
                *value <= limit,
                "{} = {:#x} does not fit a {}-bit address",
                name,
                value,
                width
            );
        }
    }

    pub(crate) fn render(&self) -> String {
        format!(
            "// SRAM bit-band pair ({}).\n\
             pub(crate) const SRAM_BASE: usize = {:#010x};\n\
             pub(crate) const SRAM_BB_BASE: usize = {:#010x};\n\
             pub(crate) const SRAM_BB_SIZE: usize = {:#010x};\n",
            self.origin, self.source_base, self.alias_base, self.size
        )
    }
}

fn required(var: &str) -> u64 {
    match env::var(var) {
        Ok(value) => parse(var, &value),
        Err(_) => panic!(
            "{} is undefined; {} and {} must be set together",
            var, SRAM_BASE_VAR, SRAM_BB_BASE_VAR
        ),
    }
}

/// accepts `0x`-prefixed hex or decimal, with optional `_` separators
fn parse(var: &str, value: &str) -> u64 {
    let cleaned: String = value.trim().chars().filter(|&c| c != '_').collect();
    let parsed = match cleaned
        .strip_prefix("0x")
        .or_else(|| cleaned.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => cleaned.parse(),
    };

    parsed.unwrap_or_else(|_| panic!("{} = {:?} is not a valid address", var, value))
}
