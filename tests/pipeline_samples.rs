//! End-to-end tests: report text through reshaping and alignment

use patbridge::mcpat::importing::{ImportError, PatImporter};
use patbridge::mcpat::lexing::TokenKind;
use patbridge::mcpat::pipeline::{parse_and_reshape, ExecutionOutput, PipelineExecutor};
use patbridge::mcpat::report::ReportSummary;
use patbridge::mcpat::target::{ComponentSpec, ComponentType, TargetTree};
use patbridge::mcpat::testing::{assert_tree, McpatSamples};

const SCENARIO_A: &str = "Core0:\n  Area = 1.2 mm^2\n  Peak Dynamic = 0.5 W\n  Subthreshold Leakage = 0.1 W\n  Gate Leakage = 0.01 W\n  Runtime Dynamic = 0.4 W\n";

#[test]
fn test_scenario_a_single_block() {
    let mut target = TargetTree::new("root");
    let core = target.add_child(target.root(), "core0", ComponentType::Core);

    PatImporter::default().import(&mut target, SCENARIO_A).unwrap();

    let record = target.result(core).unwrap();
    assert_eq!(record.area, 1.2);
    assert_eq!(record.leakage_static, 0.1);
    assert_eq!(record.leakage_gate, 0.01);
    assert_eq!(record.peak_dynamic, 0.5);
    assert_eq!(record.runtime_dynamic, 0.4);
}

#[test]
fn test_scenario_b_misindented_parameter_figures() {
    let tree =
        parse_and_reshape("Total First Level Directory:\nDevice Type= X\n  Area = 2.0 mm^2\n")
            .unwrap();
    assert_tree(&tree)
        .child_count(1)
        .child(0, |total| {
            total
                .kind(TokenKind::Parameter)
                .label("Total First Level Directory")
                .child_count(2)
                .attribute("Device Type", "X")
                .attribute("Area", "2.0 mm^2");
        });
}

#[test]
fn test_scenario_c_optional_icache_absent() {
    let report = "\
Core0:
  Area = 1.2 mm^2
  Peak Dynamic = 0.5 W
  Subthreshold Leakage = 0.1 W
  Gate Leakage = 0.01 W
  Runtime Dynamic = 0.4 W
  Instruction Fetch Unit:
    Area = 0.3 mm^2
    Peak Dynamic = 0.2 W
    Subthreshold Leakage = 0.02 W
    Gate Leakage = 0.002 W
    Runtime Dynamic = 0.1 W
";
    let spec = ComponentSpec::new("root", ComponentType::Root).child(
        ComponentSpec::new("core0", ComponentType::Core).child(
            ComponentSpec::new("ifu", ComponentType::InstructionFetchUnit)
                .child(ComponentSpec::new("icache", ComponentType::InstructionCache).optional()),
        ),
    );
    let mut target = TargetTree::from_spec(&spec);

    let placements = PatImporter::default().import(&mut target, report).unwrap();

    assert_eq!(placements.len(), 2);
    let icache = target.find("root/core0/ifu/icache").unwrap();
    assert!(target.result(icache).is_none());
    let ifu = target.find("root/core0/ifu").unwrap();
    assert_eq!(target.result(ifu).unwrap().area, 0.3);
}

#[test]
fn test_required_icache_absent_is_a_mismatch() {
    let report = "Core0:\n  Instruction Fetch Unit:\n";
    let spec = ComponentSpec::new("root", ComponentType::Root).child(
        ComponentSpec::new("core0", ComponentType::Core).hidden(),
    );
    // Hidden core: nothing is looked up below it, so the report is accepted as is.
    let mut target = TargetTree::from_spec(&spec);
    assert!(PatImporter::default().import(&mut target, report).unwrap().is_empty());

    let mut target = TargetTree::new("root");
    let icache = target.add_child(target.root(), "icache", ComponentType::InstructionCache);
    let err = PatImporter::default()
        .import(&mut target, report)
        .unwrap_err();
    match err {
        ImportError::Mismatch(mismatch) => {
            assert_eq!(mismatch.target, target.path(icache));
            assert_eq!(mismatch.candidates, vec!["Core0"]);
        }
        other => panic!("Expected mismatch, got {:?}", other),
    }
}

#[test]
fn test_sample_report_reshaped() {
    let tree = parse_and_reshape(McpatSamples::report()).unwrap();

    assert_tree(&tree)
        .child_count(6)
        .child(0, |banner| {
            banner.kind(TokenKind::MetaData);
        })
        .child(1, |technology| {
            technology.kind(TokenKind::Technology).value("90 nm");
        })
        .no_component("Processor")
        .no_component("Core")
        .component("System", |system| {
            system
                .attribute("Area", "53.2258 mm^2")
                .attribute("Peak Power", "25.2862 W")
                .component_labels(&["Core0", "Core1", "L2", "Bus0"])
                .parameter("Total Cores", |total| {
                    total.child_count(6).attribute("Device Type", "ITRS high performance device type");
                })
                .parameter("Total NoCs (Network/Bus)", |total| {
                    total.child_count(6);
                })
                .parameter("Total Buses", |total| {
                    total.child_count(5).attribute("Area", "1.668 mm^2");
                })
                .component("Bus0", |bus| {
                    bus.attribute("Area", "1.512 mm^2");
                })
                .component("Core0", |core| {
                    core.attribute("Area", "24.75 mm^2")
                        .component_labels(&[
                            "Instruction Fetch Unit",
                            "Branch Predictor",
                            "Branch Target Buffer",
                            "Renaming Unit",
                            "Load Store Unit",
                            "Memory Management Unit",
                            "Itlb",
                            "Dtlb",
                            "Execution Unit",
                        ])
                        .component("Instruction Fetch Unit", |ifu| {
                            ifu.component_labels(&[
                                "Instruction Cache",
                                "Instruction Buffer",
                                "Instruction Decoder",
                            ]);
                        })
                        .component("Branch Predictor", |bp| {
                            bp.component_labels(&[
                                "Global Predictor",
                                "Local Predictor",
                                "Chooser",
                                "RAS",
                            ])
                            .component("Local Predictor", |local| {
                                local.component_labels(&[
                                    "L1_Local Predictor",
                                    "L2_Local Predictor",
                                ]);
                            });
                        })
                        .component("Load Store Unit", |lsu| {
                            lsu.component_labels(&["Data Cache", "LoadQ", "StoreQ"]);
                        })
                        .component("Memory Management Unit", |mmu| {
                            mmu.component_labels(&[]);
                        })
                        .component("Execution Unit", |exu| {
                            exu.component_labels(&[
                                "Register Files",
                                "Integer RF",
                                "Floating Point RF",
                                "Instruction Scheduler",
                                "Integer ALUs (Count: 2 )",
                                "Floating Point Units (FPUs) (Count: 1 )",
                                "Complex ALUs (Mul/Div) (Count: 1 )",
                                "Results Broadcast Bus",
                            ]);
                        });
                })
                .component("Core1", |core| {
                    core.attribute("Area", "15.0 mm^2");
                });
        });
}

#[test]
fn test_sample_report_import() {
    let mut target = McpatSamples::target().unwrap();
    let placements = PatImporter::default()
        .import(&mut target, McpatSamples::report())
        .unwrap();

    assert_eq!(placements.len(), 28);
    assert_eq!(placements[0].target, "root/system");
    assert_eq!(placements[0].source, "System");

    let system = target.find("root/system").unwrap();
    let record = target.result(system).unwrap();
    assert_eq!(record.area, 53.2258);
    assert_eq!(record.leakage_static, 3.1);
    assert_eq!(record.leakage_gate, 0.35);
    assert_eq!(record.attribute("Total Leakage"), Some("3.45 W"));

    let core1 = target.find("root/system/core1").unwrap();
    assert_eq!(target.result(core1).unwrap().area, 15.0);
    let l2 = target.find("root/system/l2").unwrap();
    assert_eq!(target.result(l2).unwrap().area, 17.289);
    let bus = target.find("root/system/bus0").unwrap();
    assert_eq!(target.result(bus).unwrap().area, 1.512);

    // The split queues carry the same figures
    let loadq = target.find("root/system/core0/lsu/loadq").unwrap();
    let storeq = target.find("root/system/core0/lsu/storeq").unwrap();
    assert_eq!(target.result(loadq), target.result(storeq));

    for path in [
        "root",
        "root/system/core0/bp/global",
        "root/system/core1/tracer",
        "root/system/l3",
        "root/system/nic",
    ] {
        let id = target.find(path).unwrap();
        assert!(target.result(id).is_none(), "{} should have no record", path);
    }
}

#[test]
fn test_sample_report_reimport_is_stable() {
    let importer = PatImporter::default();
    let mut target = McpatSamples::target().unwrap();
    let first = importer.import(&mut target, McpatSamples::report()).unwrap();
    let second = importer.import(&mut target, McpatSamples::report()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_sample_report_summary() {
    let tree = parse_and_reshape(McpatSamples::report()).unwrap();
    let summary = ReportSummary::from_tree(&tree);
    assert_eq!(summary.version.as_deref(), Some("0.8 of Aug, 2010"));
    assert_eq!(summary.technology_nm, Some(90));
    assert_eq!(summary.clock_rate_mhz, Some(1200));
    assert!(summary.long_channel_devices);
}

#[test]
fn test_executor_stages_on_sample() {
    let executor = PipelineExecutor::new();
    let source = McpatSamples::report();

    match executor.execute("tokens", source).unwrap() {
        ExecutionOutput::Tokens(lines) => {
            assert_eq!(lines.len(), source.lines().count());
        }
        other => panic!("Expected tokens, got {:?}", other),
    }

    match executor.execute("normalized", source).unwrap() {
        ExecutionOutput::Tree(tree) => {
            assert_tree(&tree)
                .component("Processor", |processor| {
                    processor.no_component("Core0");
                })
                .component("Core", |_| {})
                .component("BUSES", |buses| {
                    buses.component_labels(&["Bus"]);
                });
        }
        other => panic!("Expected tree, got {:?}", other),
    }

    let reshaped = match executor.execute("default", source).unwrap() {
        ExecutionOutput::Tree(tree) => tree,
        other => panic!("Expected tree, got {:?}", other),
    };
    assert_eq!(
        reshaped.outline(),
        parse_and_reshape(source).unwrap().outline()
    );
}
