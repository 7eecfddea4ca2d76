//! Sample fixtures compiled into the crate

use crate::mcpat::target::TargetTree;

const REPORT: &str = include_str!("../../../samples/mcpat-report.txt");
const TARGET: &str = include_str!("../../../samples/target.yaml");

/// Curated report and hierarchy fixtures.
///
/// The report is a two-core McPAT 0.8 run at print level 5; the hierarchy covers every
/// alignment outcome against it (matched, rolled up, excluded, optional and absent).
pub struct McpatSamples;

impl McpatSamples {
    /// Full McPAT report text
    pub fn report() -> &'static str {
        REPORT
    }

    /// Hierarchy description as YAML
    pub fn target_yaml() -> &'static str {
        TARGET
    }

    /// Fresh hierarchy built from [`McpatSamples::target_yaml`]
    pub fn target() -> Result<TargetTree, serde_yaml::Error> {
        TargetTree::from_yaml(TARGET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_fixture_loads() {
        let target = McpatSamples::target().unwrap();
        assert!(target.find("root/system/core0/exu/scheduler/fpwindow").is_some());
        assert!(target.find("root/system/core1/tracer").is_some());
    }

    #[test]
    fn test_report_fixture_has_banner() {
        assert!(McpatSamples::report().starts_with("McPAT (version 0.8"));
    }
}
