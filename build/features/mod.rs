pub(crate) mod family;

use crate::regions::{self, Layout};

/// check that exactly one configuration source for the SRAM bit-band pair has been selected
/// this check asserts:
/// * at most one core feature is enabled (e.g. cortex-m4)
/// * the core features and the environment override are not combined
pub(crate) fn validate_selected_sources() -> bool {
    let cores = CORE_FEATURES.iter().filter(|&&b| b).count();
    let env = regions::is_env_override_present();

    cores + usize::from(env) == 1
}

/// layout implied by the enabled core feature, `None` when the environment supplies it
pub(crate) fn selected_layout() -> Option<Layout> {
    family::CORE_FAMILY
        .iter()
        .find(|gate| gate.state)
        .map(|gate| regions::armv7m_sram(gate.name))
}

pub(crate) const IS_FEATURE_ENABLED_CM3: bool = cfg!(feature = "cortex-m3");
pub(crate) const IS_FEATURE_ENABLED_CM4: bool = cfg!(feature = "cortex-m4");

const CORE_FEATURES: &[bool] = &[IS_FEATURE_ENABLED_CM3, IS_FEATURE_ENABLED_CM4];
