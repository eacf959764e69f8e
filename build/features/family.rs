use crate::{features::*, FeatureGate};

/// cores whose memory map carries the architectural SRAM bit-band region
/// (first MiB of SRAM at 0x2000_0000, aliased at 0x2200_0000)
pub(crate) const CORE_FAMILY: &[FeatureGate] = &[
    FeatureGate {
        name: "Cortex-M3",
        state: IS_FEATURE_ENABLED_CM3,
    },
    FeatureGate {
        name: "Cortex-M4",
        state: IS_FEATURE_ENABLED_CM4,
    },
];
